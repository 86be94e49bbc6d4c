use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::error::DataFormatError;
use super::model::{LumiMask, LumiRange};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a certification file.
///
/// Expected layout: a JSON object whose keys are decimal run numbers and
/// whose values are arrays of inclusive `[start, end]` lumi-block pairs:
///
/// ```json
/// {
///   "314472": [[1, 228], [230, 310]],
///   "314473": [[1, 952]]
/// }
/// ```
///
/// Intervals may appear in any order in the file; they are normalized to
/// sorted disjoint form on load.
pub fn load_file(path: &Path) -> Result<LumiMask, DataFormatError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mask = load_str(&text)?;
    log::info!(
        "Loaded {} certified runs ({} lumi ranges) from {}",
        mask.num_runs(),
        mask.num_ranges(),
        path.display()
    );
    Ok(mask)
}

/// Load certification JSON from any reader.
pub fn load_reader<R: Read>(reader: R) -> Result<LumiMask, DataFormatError> {
    let doc = serde_json::from_reader(reader)?;
    build(doc)
}

/// Load certification JSON from an in-memory string, e.g. an embedded blob.
pub fn load_str(text: &str) -> Result<LumiMask, DataFormatError> {
    let doc = serde_json::from_str(text)?;
    build(doc)
}

// ---------------------------------------------------------------------------
// Document → mask
// ---------------------------------------------------------------------------

/// Serde enforces the value shape (arrays of two-element non-negative
/// integer pairs); run keys and interval ordering are checked here.
fn build(doc: BTreeMap<String, Vec<LumiRange>>) -> Result<LumiMask, DataFormatError> {
    let mut raw: BTreeMap<u32, Vec<LumiRange>> = BTreeMap::new();

    for (key, intervals) in doc {
        let run: u32 = key
            .parse()
            .map_err(|_| DataFormatError::RunKey(key.clone()))?;
        // "123" and "0123" land on the same run
        raw.entry(run).or_default().extend(intervals);
    }

    LumiMask::from_ranges(raw)
}
