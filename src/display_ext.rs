//! Implement [`std::fmt::Display`] for types such as `Option<T>` and slice `&[T]`.

use std::fmt;

/// Implement `Display` for `Option<T>` if T is `Display`.
///
/// It outputs a literal string `"None"` if it is None, otherwise it invokes the Display
/// implementation for T.
pub(crate) struct DisplayOption<'a, T: fmt::Display>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for DisplayOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => {
                write!(f, "None")
            }
            Some(x) => x.fmt(f),
        }
    }
}

pub(crate) trait DisplayOptionExt<'a, T: fmt::Display> {
    fn display(&'a self) -> DisplayOption<'a, T>;
}

impl<T> DisplayOptionExt<'_, T> for Option<T>
where T: fmt::Display
{
    fn display(&self) -> DisplayOption<'_, T> {
        DisplayOption(self)
    }
}

/// Implement `Display` for `&[T]` if T is `Display`.
///
/// It outputs at most `max` elements, excluding those from the `max-1`th to the second-to-last
/// one: `[1,2,3,4,5,6]` with `max=5` outputs `"[1,2,3,4,..,6]"`.
pub(crate) struct DisplaySlice<'a, T: fmt::Display> {
    pub slice: &'a [T],
    pub max: usize,
}

impl<T: fmt::Display> fmt::Display for DisplaySlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.slice.len();

        write!(f, "[")?;

        if len > self.max {
            for (i, t) in self.slice[..(self.max - 1)].iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", t)?;
            }

            write!(f, ",..,")?;
            if let Some(last) = self.slice.last() {
                write!(f, "{}", last)?;
            }
        } else {
            for (i, t) in self.slice.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", t)?;
            }
        }

        write!(f, "]")
    }
}

pub(crate) trait DisplaySliceExt<'a, T: fmt::Display> {
    fn display(&'a self) -> DisplaySlice<'a, T>;
}

impl<T> DisplaySliceExt<'_, T> for [T]
where T: fmt::Display
{
    fn display(&self) -> DisplaySlice<'_, T> {
        DisplaySlice { slice: self, max: 5 }
    }
}
