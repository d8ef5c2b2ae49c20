use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::ops::RangeBounds;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One benchmark result file and how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Prefix of the legend entry, e.g. `"Tree"` gives `"Tree push_back"`.
    pub label: String,
    pub path: PathBuf,
    /// Line colour as RGB; picked from the palette when absent.
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

/// Pipeline configuration.
///
/// Built from [`Config::default`], optionally overlaid by a JSON file
/// (missing fields keep their defaults) and then by command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Result files to compare; each contributes one line per chart.
    pub sources: Vec<SourceConfig>,
    /// Number of consecutive samples averaged into one plotted point.
    pub block_size: NonZeroUsize,
    /// Operation names, indexed by measurement column.
    pub operations: Vec<String>,
    /// How many operations (from the front of `operations`) get a chart.
    pub plotted_operations: usize,
    /// Charts per row in the window.
    pub grid_columns: usize,
    pub x_label: String,
    pub y_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig {
                    label: "Tree".to_string(),
                    path: PathBuf::from("cmake-build-debug/results"),
                    color: Some([0, 128, 0]),
                },
                SourceConfig {
                    label: "vector".to_string(),
                    path: PathBuf::from("cmake-build-debug/results-vec"),
                    color: Some([255, 0, 0]),
                },
            ],
            block_size: NonZeroUsize::new(10_000).unwrap_or(NonZeroUsize::MIN),
            operations: ["push_back", "remove", "insert", "get", "set"]
                .into_iter()
                .map(String::from)
                .collect(),
            plotted_operations: 4,
            grid_columns: 2,
            x_label: "Number of elements".to_string(),
            y_label: "time, nanoseconds".to_string(),
        }
    }
}

impl Config {
    /// Load a [`Config`] from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let reader = BufReader::new(
            File::open(file).with_context(|| format!("failed to open {file:?}"))?,
        );
        let config: Config =
            serde_json::from_reader(reader).context("failed to deserialize config")?;
        config.validate().context("failed to validate config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.sources.len(), 1..).context("invalid number of sources")?;
        check_num(self.plotted_operations, 1..=self.operations.len())
            .context("invalid number of plotted operations")?;
        check_num(self.grid_columns, 1..).context("invalid number of grid columns")?;
        for (i, source) in self.sources.iter().enumerate() {
            if source.label.trim().is_empty() {
                bail!("source {i} has an empty label");
            }
        }
        Ok(())
    }

    /// Names of the operations that get a chart, in column order.
    pub fn plotted(&self) -> &[String] {
        &self.operations[..self.plotted_operations.min(self.operations.len())]
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
