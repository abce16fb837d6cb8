//! Object labels encoded in model image paths.

use crate::util::{HistMatchError, HistMatchResult};
use std::path::Path;

/// Resolves the object identifier of an image from its path.
pub trait LabelExtractor {
    fn label(&self, path: &Path) -> HistMatchResult<u32>;
}

impl<F> LabelExtractor for F
where
    F: Fn(&Path) -> HistMatchResult<u32>,
{
    fn label(&self, path: &Path) -> HistMatchResult<u32> {
        self(path)
    }
}

/// Reads `N` from file names shaped like `objN_...` (e.g. `obj42__15.png`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectIdLabel;

impl LabelExtractor for ObjectIdLabel {
    fn label(&self, path: &Path) -> HistMatchResult<u32> {
        let fail = |reason| HistMatchError::Label {
            path: path.display().to_string(),
            reason,
        };
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| fail("missing or non UTF-8 file name"))?;
        let rest = name
            .strip_prefix("obj")
            .ok_or_else(|| fail("file name does not start with `obj`"))?;
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..digits_end]
            .parse()
            .map_err(|_| fail("no integer object id after `obj`"))
    }
}
