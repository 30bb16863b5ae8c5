use crate::{Error, Result};

/// Bar window of an indicator: `period` values ending `offset` values
/// before the newest one.
///
/// Given a sequence ordered oldest first, the window is
/// `items[len - (period + offset) .. len - offset]`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub(crate) struct Window {
    period: usize,
    offset: usize,
}

impl Window {
    pub fn new(period: usize, offset: usize) -> Self {
        debug_assert!(period > 0, "window period must be positive");
        Self { period, offset }
    }

    #[inline]
    pub fn period(self) -> usize {
        self.period
    }

    #[inline]
    pub fn offset(self) -> usize {
        self.offset
    }

    /// Number of trailing items needed to fill the window.
    ///
    /// Saturates, so an oversized offset reads as a window no slice can
    /// fill.
    #[inline]
    pub fn required(self) -> usize {
        self.period.saturating_add(self.offset)
    }

    /// Fails with [`Error::InsufficientData`] unless `available` covers
    /// `required` items.
    #[inline]
    pub fn ensure(required: usize, available: usize) -> Result<()> {
        if available < required {
            return Err(Error::InsufficientData {
                required,
                available,
            });
        }

        Ok(())
    }

    /// Returns the `period` items of the window.
    pub fn slice<T>(self, items: &[T]) -> Result<&[T]> {
        Self::ensure(self.required(), items.len())?;

        let end = items.len() - self.offset;
        Ok(&items[end - self.period..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_is_period_plus_offset() {
        assert_eq!(Window::new(3, 2).required(), 5);
        assert_eq!(Window::new(3, 0).required(), 3);
    }

    #[test]
    fn required_saturates() {
        assert_eq!(Window::new(3, usize::MAX).required(), usize::MAX);
    }

    mod slice {
        use super::*;

        #[test]
        fn without_offset_takes_newest() {
            let items = [1, 2, 3, 4, 5];
            assert_eq!(Window::new(3, 0).slice(&items), Ok(&[3, 4, 5][..]));
        }

        #[test]
        fn offset_skips_newest() {
            let items = [1, 2, 3, 4, 5, 6];
            assert_eq!(Window::new(3, 2).slice(&items), Ok(&[2, 3, 4][..]));
        }

        #[test]
        fn exact_length_succeeds() {
            let items = [1, 2, 3, 4, 5];
            assert_eq!(Window::new(3, 2).slice(&items), Ok(&[1, 2, 3][..]));
        }

        #[test]
        fn one_short_fails() {
            let items = [1, 2, 3, 4];
            assert_eq!(
                Window::new(3, 2).slice(&items),
                Err(Error::InsufficientData {
                    required: 5,
                    available: 4
                })
            );
        }

        #[test]
        fn oversized_offset_fails() {
            let items = [1, 2, 3];
            assert_eq!(
                Window::new(3, usize::MAX).slice(&items),
                Err(Error::InsufficientData {
                    required: usize::MAX,
                    available: 3
                })
            );
        }

        #[test]
        fn empty_fails() {
            let items: [u8; 0] = [];
            assert_eq!(
                Window::new(1, 0).slice(&items),
                Err(Error::InsufficientData {
                    required: 1,
                    available: 0
                })
            );
        }
    }
}
