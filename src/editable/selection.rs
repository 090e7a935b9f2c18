//! Selection offsets for the single-line editing engine.

use serde::{Deserialize, Serialize};

/// A selection over the flattened line, measured in chars.
///
/// `start` is where the selection began and `end` is where the caret sits, so
/// a backward drag yields `start > end`. Use [`Selection::min`] and
/// [`Selection::max`] for the ordered bounds.
///
/// Serializes as `{start, end, collapsed}`. `collapsed` is ignored when read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "SelectionRecord")]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

#[derive(Serialize)]
struct SelectionRecord {
    start: usize,
    end: usize,
    collapsed: bool,
}

impl From<Selection> for SelectionRecord {
    fn from(selection: Selection) -> Self {
        Self {
            start: selection.start,
            end: selection.end,
            collapsed: selection.is_collapsed(),
        }
    }
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed selection (caret with no range)
    pub const fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// True when there is no range, only a caret
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Lower bound of the range
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Upper bound of the range
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Number of chars covered by the range
    pub fn len(&self) -> usize {
        self.max() - self.min()
    }

    /// Both offsets moved right by `by`
    pub fn shifted_right(&self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    /// Both offsets moved left by `by`, saturating at zero
    pub fn shifted_left(&self, by: usize) -> Self {
        Self::new(self.start.saturating_sub(by), self.end.saturating_sub(by))
    }

    /// Whether both offsets fit inside a line of `len` chars
    pub fn fits(&self, len: usize) -> bool {
        self.start <= len && self.end <= len
    }

    /// Resolve this selection against a line of `len` chars.
    ///
    /// Offsets that point past the text cannot be mapped, so the whole
    /// selection falls back to a caret at the end of the line.
    pub fn resolve(&self, len: usize) -> Self {
        if self.fits(len) {
            *self
        } else {
            Self::collapsed(len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(5);
        assert!(sel.is_collapsed());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_selection_min_max() {
        let forward = Selection::new(2, 7);
        assert_eq!(forward.min(), 2);
        assert_eq!(forward.max(), 7);

        let backward = Selection::new(7, 2);
        assert_eq!(backward.min(), 2);
        assert_eq!(backward.max(), 7);
        assert_eq!(backward.len(), 5);
    }

    #[test]
    fn test_selection_shift_left_saturates() {
        let sel = Selection::new(2, 6).shifted_left(4);
        assert_eq!(sel, Selection::new(0, 2));
        assert!(Selection::new(1, 3).shifted_left(4).is_collapsed());
    }

    #[test]
    fn test_selection_serializes_collapsed_flag() {
        let json = serde_json::to_value(Selection::new(2, 5)).unwrap();
        assert_eq!(json, serde_json::json!({ "start": 2, "end": 5, "collapsed": false }));

        let json = serde_json::to_value(Selection::collapsed(3)).unwrap();
        assert_eq!(json["collapsed"], true);
    }

    #[test]
    fn test_selection_reads_with_or_without_collapsed() {
        let sel: Selection = serde_yaml::from_str("{ start: 1, end: 4 }").unwrap();
        assert_eq!(sel, Selection::new(1, 4));

        let sel: Selection =
            serde_json::from_str(r#"{"start":2,"end":2,"collapsed":true}"#).unwrap();
        assert_eq!(sel, Selection::collapsed(2));
    }

    #[test]
    fn test_resolve_out_of_range_collapses_to_end() {
        assert_eq!(Selection::new(1, 3).resolve(5), Selection::new(1, 3));
        assert_eq!(Selection::new(1, 9).resolve(5), Selection::collapsed(5));
        assert_eq!(Selection::collapsed(6).resolve(0), Selection::collapsed(0));
    }
}
