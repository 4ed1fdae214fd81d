use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::record::StatMode;

/// Named knobs of the chart renderers, all defaulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root folder every chart is written under
    pub output_dir: PathBuf,
    pub bar: BarSettings,
    pub box_plot: FigureSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    /// Sub folder of `output_dir` holding one folder per mode
    pub dir: String,
    /// Records must be strictly above this to get a bar
    pub threshold: f64,
    #[serde(flatten)]
    pub figure: FigureSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSettings {
    pub width: u32,
    pub height: u32,
    /// Degrees, one of 0, 90, 180 or 270
    pub x_label_rotation: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            bar: BarSettings::default(),
            box_plot: FigureSettings {
                width: 1200,
                height: 600,
                x_label_rotation: 90,
            },
        }
    }
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            dir: "bar_charts".to_owned(),
            threshold: 500.0,
            figure: FigureSettings::default(),
        }
    }
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 700,
            x_label_rotation: 90,
        }
    }
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read_to_string(path).context(format!("Read {}", path.display()))?;
        serde_yml::from_str(&data).context(format!("Parse {}", path.display()))
    }

    /// `{output_dir}/{bar.dir}/{mode}`
    pub fn bar_chart_dir(&self, mode: StatMode) -> PathBuf {
        self.output_dir.join(&self.bar.dir).join(mode.as_str())
    }
}
