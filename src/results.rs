use crate::error::{Error, Result};
use crate::key::Coord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The single hand-off contract between the benchmark binary and this tool:
/// a line of this exact form somewhere in its standard output.
pub const OUTPUT_MARKER: &str = "Writing output to:";

/// Find the artifact path announced in captured benchmark output.
///
/// Exactly one marker line is expected: zero matches means the benchmark did
/// not produce an artifact, and more than one is ambiguous and rejected
/// rather than silently picking the first.
pub fn extract_output_path(stdout: &str) -> Result<PathBuf> {
    let matches: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix(OUTPUT_MARKER))
        .map(str::trim)
        .collect();

    match matches.as_slice() {
        [] => Err(Error::MissingOutputMarker),
        [path] => Ok(PathBuf::from(path)),
        many => Err(Error::AmbiguousOutputMarker(many.len())),
    }
}

/// One measured metric at one swept configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub coord: Coord,
    pub value: f64,
}

/// The decoded contents of one benchmark artifact: an ordered sequence of
/// samples, immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    samples: Vec<Sample>,
}

/// The two artifact shapes the benchmark emits: an ordered list of
/// `[key, value]` pairs, or an object mapping key to value. Both normalize
/// to the same sample sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArtifact {
    Pairs(Vec<(String, f64)>),
    Map(BTreeMap<String, f64>),
}

impl ResultSet {
    pub fn from_path(path: &Path) -> Result<ResultSet> {
        let contents = fs::read_to_string(path)?;

        let raw: RawArtifact = serde_json::from_str(&contents).map_err(|err| Error::Artifact {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let pairs: Vec<(String, f64)> = match raw {
            RawArtifact::Pairs(pairs) => pairs,
            RawArtifact::Map(map) => map.into_iter().collect(),
        };

        let samples = pairs
            .into_iter()
            .map(|(key, value)| {
                Ok(Sample {
                    coord: Coord::decode(&key)?,
                    value,
                })
            })
            .collect::<Result<Vec<Sample>>>()?;

        Ok(ResultSet { samples })
    }

    pub fn from_samples(samples: Vec<Sample>) -> ResultSet {
        ResultSet { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.value)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_artifact(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn extracts_single_marker_line() {
        let stdout = "some chatter\nWriting output to: results/run-1.json\nmore chatter\n";
        assert_eq!(
            extract_output_path(stdout).unwrap(),
            PathBuf::from("results/run-1.json")
        );
    }

    #[test]
    fn missing_marker_is_an_error() {
        assert!(matches!(
            extract_output_path("no artifact here\n"),
            Err(Error::MissingOutputMarker)
        ));
    }

    #[test]
    fn multiple_markers_are_rejected() {
        let stdout = "Writing output to: a.json\nWriting output to: b.json\n";
        assert!(matches!(
            extract_output_path(stdout),
            Err(Error::AmbiguousOutputMarker(2))
        ));
    }

    #[test]
    fn loads_pair_form_artifact() {
        let file = write_artifact(r#"[["(128, 4096)", 0.5], ["(256, 4096)", 0.25]]"#);
        let set = ResultSet::from_path(file.path()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.samples()[0].coord, Coord::new(128.0, 4096.0));
        assert_eq!(set.samples()[0].value, 0.5);
        assert_eq!(set.samples()[1].coord, Coord::new(256.0, 4096.0));
        assert_eq!(set.samples()[1].value, 0.25);
    }

    #[test]
    fn object_form_decodes_like_pair_form() {
        let pairs = write_artifact(r#"[["(2, 10)", 1.0], ["(4, 10)", 2.0]]"#);
        let map = write_artifact(r#"{"(2, 10)": 1.0, "(4, 10)": 2.0}"#);

        let from_pairs = ResultSet::from_path(pairs.path()).unwrap();
        let from_map = ResultSet::from_path(map.path()).unwrap();

        assert_eq!(from_pairs, from_map);
    }

    #[test]
    fn malformed_json_is_an_artifact_error() {
        let file = write_artifact("[[not json");
        assert!(matches!(
            ResultSet::from_path(file.path()),
            Err(Error::Artifact { .. })
        ));
    }

    #[test]
    fn malformed_key_is_a_decode_error() {
        let file = write_artifact(r#"[["128,4096", 0.5]]"#);
        assert!(matches!(
            ResultSet::from_path(file.path()),
            Err(Error::KeyDecode(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ResultSet::from_path(Path::new("/nonexistent/artifact.json")),
            Err(Error::Io(_))
        ));
    }
}
