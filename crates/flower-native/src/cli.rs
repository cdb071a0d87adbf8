use anyhow::Context;
use clap::{Parser, ValueEnum};
use flower_core::{Playback, PointLayout, SceneConfig, Timeline, DEFAULT_STATE_JSON};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "flower-native", version, about = "Keyframed particle flower (winit + wgpu)")]
pub struct Cli {
    /// Project state JSON; the bundled sequence is used when omitted.
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Scene config JSON (camera, clear colour, point count).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Wrap the sequence instead of holding the last frame.
    #[arg(long = "loop", default_value_t = false)]
    pub looping: bool,

    /// Fixed point count, overriding the width-based choice.
    #[arg(long)]
    pub points: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Legacy,
    Uniform,
}

impl From<LayoutArg> for PointLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Legacy => PointLayout::Legacy,
            LayoutArg::Uniform => PointLayout::Uniform,
        }
    }
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SceneConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SceneConfig::default(),
        };
        if let Some(layout) = self.layout {
            cfg.layout = layout.into();
        }
        if self.looping {
            cfg.playback = Playback::Loop;
        }
        if self.points.is_some() {
            cfg.point_count = self.points;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn timeline(&self) -> anyhow::Result<Timeline> {
        match &self.state {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading state {}", path.display()))?;
                Timeline::from_json(&json)
                    .with_context(|| format!("loading state {}", path.display()))
            }
            None => Ok(Timeline::from_json(DEFAULT_STATE_JSON)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::parse_from(["flower-native", "--layout", "uniform", "--loop", "--points", "64"]);
        let cfg = cli.scene_config().unwrap();
        assert_eq!(cfg.layout, PointLayout::Uniform);
        assert_eq!(cfg.playback, Playback::Loop);
        assert_eq!(cfg.point_count_for_width(1280.0), 64);
    }

    #[test]
    fn defaults_use_bundled_state() {
        let cli = Cli::parse_from(["flower-native"]);
        assert_eq!((cli.width, cli.height), (1280, 800));
        let cfg = cli.scene_config().unwrap();
        assert_eq!(cfg.playback, Playback::Once);
        assert!(cli.timeline().unwrap().length() > 0.0);
    }

    #[test]
    fn zero_points_rejected() {
        let cli = Cli::parse_from(["flower-native", "--points", "0"]);
        assert!(cli.scene_config().is_err());
    }
}
