//! Scene configuration for the viewer binary.
//!
//! A scene is a TOML file describing the world size, window dressing and the
//! blocks to place:
//!
//! ```toml
//! title = "WarCon"
//! viewport = [10, 10]
//! world = [20, 20]
//! grid_size = 32
//! icon = "view/icon.png"
//! music = "audio/theme.ogg"
//!
//! [[blocks]]
//! x = 0
//! y = 0
//! image = "view/tiles/grass.png"
//! count = 20
//!
//! [[blocks]]
//! x = 64
//! y = 32
//! color = [120, 80, 40]
//! ```
//!
//! Relative asset paths are resolved against the scene file's directory.
//! `TILE_WORLD_FPS`, `TILE_WORLD_SCROLL_SPEED` and `TILE_WORLD_LOG_PATH`
//! override the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{FrameLimiter, Platform, World, WorldConfig, WorldError};
use crate::types::{Image, Rgb, Rgba, DEFAULT_FPS, DEFAULT_SCROLL_SPEED};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scene '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("block #{index}: {reason}")]
    InvalidBlock { index: usize, reason: &'static str },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// One entry of the `[[blocks]]` list.
///
/// Exactly one of `image` and `color` must be given. `count` repeats the
/// block to the right, one grid cell apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

impl BlockPlacement {
    pub fn image(x: i32, y: i32, path: impl Into<PathBuf>) -> Self {
        Self {
            x,
            y,
            image: Some(path.into()),
            color: None,
            count: 1,
        }
    }

    pub fn color(x: i32, y: i32, rgb: [u8; 3]) -> Self {
        Self {
            x,
            y,
            image: None,
            color: Some(rgb),
            count: 1,
        }
    }

    pub fn repeated(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// x of the `i`-th repeat, or `None` past the `i32` range.
    fn column(&self, i: u32, cell: i32) -> Option<i32> {
        i32::try_from(i).ok()?.checked_mul(cell)?.checked_add(self.x)
    }

    fn columns(&self, cell: i32) -> impl Iterator<Item = i32> + '_ {
        (0..self.count).map_while(move |i| self.column(i, cell))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    /// Viewport size in grid cells.
    pub viewport: [i32; 2],
    /// World size in grid cells.
    pub world: [i32; 2],
    pub grid_size: i32,
    pub ground_offset: i32,
    pub fps: u32,
    pub scroll_speed: u32,
    pub background_color: [u8; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<PathBuf>,
    pub blocks: Vec<BlockPlacement>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Tile World".to_string(),
            viewport: [10, 10],
            world: [20, 20],
            grid_size: 32,
            ground_offset: 0,
            fps: DEFAULT_FPS,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            background_color: [0, 0, 0],
            background: None,
            icon: None,
            music: None,
            blocks: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Read a scene file, resolving its relative asset paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene: SceneConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            scene.resolve_paths(base);
        }
        scene.validate()?;
        info!("scene loaded: '{}' ({} placements)", path.display(), scene.blocks.len());
        Ok(scene)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The built-in scene shown when no file is given: a grass floor across
    /// the whole world with a few brick stacks, using solid colours only.
    pub fn demo() -> Self {
        let mut blocks = vec![
            BlockPlacement::color(0, 0, [60, 140, 50]).repeated(20),
            BlockPlacement::color(0, 32, [110, 80, 50]).repeated(3),
        ];
        for (i, x) in [160, 320, 448, 576].into_iter().enumerate() {
            for level in 0..=(i as i32 + 1) {
                blocks.push(BlockPlacement::color(x, 32 + level * 32, [150, 70, 50]));
            }
        }
        blocks.push(BlockPlacement::color(288, 320, [230, 200, 60]).repeated(2));

        Self {
            title: "Tile World (demo)".to_string(),
            background_color: [40, 60, 110],
            blocks,
            ..Self::default()
        }
    }

    /// Check the placements; world dimensions are checked by [`WorldConfig`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, block) in self.blocks.iter().enumerate() {
            match (&block.image, &block.color) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::InvalidBlock {
                        index,
                        reason: "both 'image' and 'color' given",
                    })
                }
                (None, None) => {
                    return Err(ConfigError::InvalidBlock {
                        index,
                        reason: "needs an 'image' or a 'color'",
                    })
                }
                _ => {}
            }
            if block.count == 0 {
                return Err(ConfigError::InvalidBlock {
                    index,
                    reason: "'count' must be at least 1",
                });
            }
            if block.column(block.count - 1, self.grid_size).is_none() {
                return Err(ConfigError::InvalidBlock {
                    index,
                    reason: "repeats run past the coordinate range",
                });
            }
        }
        self.world_config().validate()?;
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        self.background.iter_mut().for_each(resolve);
        self.icon.iter_mut().for_each(resolve);
        self.music.iter_mut().for_each(resolve);
        for block in &mut self.blocks {
            block.image.iter_mut().for_each(resolve);
        }
    }

    /// Apply environment overrides on top of the file.
    pub fn with_overrides(mut self, env: &EnvOverrides) -> Self {
        if let Some(fps) = env.fps {
            self.fps = fps;
        }
        if let Some(speed) = env.scroll_speed {
            self.scroll_speed = speed;
        }
        self
    }

    pub fn world_config(&self) -> WorldConfig {
        let [r, g, b] = self.background_color;
        WorldConfig::new(
            self.viewport[0],
            self.viewport[1],
            self.world[0],
            self.world[1],
            self.grid_size,
        )
        .with_ground_offset(self.ground_offset)
        .with_fps(self.fps)
        .with_scroll_speed(self.scroll_speed)
        .with_background_color(Rgba::from(Rgb::new(r, g, b)))
    }

    /// Dress `world` and place every block. Returns how many placements fell
    /// back to the error tile.
    pub fn apply<P: Platform, L: FrameLimiter>(&self, world: &mut World<P, L>) -> usize {
        world.set_title(&self.title);
        if let Some(icon) = &self.icon {
            world.set_icon(icon);
        }
        if let Some(music) = &self.music {
            world.load_music(music);
        }
        if let Some(background) = &self.background {
            world.set_background(background);
        }

        let cell = world.config().grid_size;
        let mut swatches: HashMap<[u8; 3], Rc<Image>> = HashMap::new();
        let mut fallbacks = 0;
        for placement in &self.blocks {
            for x in placement.columns(cell) {
                if let Some(path) = &placement.image {
                    if !world.place_block(x, placement.y, path) {
                        fallbacks += 1;
                    }
                } else if let Some(rgb) = placement.color {
                    let swatch = swatches
                        .entry(rgb)
                        .or_insert_with(|| Rc::new(solid_tile(cell as u32, rgb)))
                        .clone();
                    world.place_image(x, placement.y, swatch);
                }
            }
        }
        debug!(
            "scene applied: {} sprites, {} fallbacks",
            world.sprites().len(),
            fallbacks
        );
        fallbacks
    }
}

fn solid_tile(size: u32, [r, g, b]: [u8; 3]) -> Image {
    Image::filled(size, size, Rgba::opaque(r, g, b))
}

/// Settings read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub fps: Option<u32>,
    pub scroll_speed: Option<u32>,
    pub log_path: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable numbers are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fps = lookup("TILE_WORLD_FPS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&fps: &u32| fps > 0);
        let scroll_speed = lookup("TILE_WORLD_SCROLL_SPEED").and_then(|s| s.trim().parse().ok());
        let log_path = lookup("TILE_WORLD_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            fps,
            scroll_speed,
            log_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_world_defaults() {
        let scene = SceneConfig::from_toml_str("").unwrap();
        let config = scene.world_config();
        assert_eq!(config, WorldConfig::new(10, 10, 20, 20, 32));
    }

    #[test]
    fn test_parse_blocks() {
        let scene = SceneConfig::from_toml_str(
            r#"
            title = "WarCon"
            world = [40, 20]

            [[blocks]]
            x = 0
            y = 0
            image = "grass.png"
            count = 3

            [[blocks]]
            x = 64
            y = 32
            color = [1, 2, 3]
            "#,
        )
        .unwrap();

        assert_eq!(scene.title, "WarCon");
        assert_eq!(scene.world, [40, 20]);
        assert_eq!(
            scene.blocks,
            vec![
                BlockPlacement::image(0, 0, "grass.png").repeated(3),
                BlockPlacement::color(64, 32, [1, 2, 3]),
            ]
        );
    }

    #[test]
    fn test_block_needs_exactly_one_source() {
        let err = SceneConfig::from_toml_str("[[blocks]]\nx = 0\ny = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlock { index: 0, .. }));

        let err = SceneConfig::from_toml_str(
            "[[blocks]]\nx = 0\ny = 0\nimage = \"a.png\"\ncolor = [0, 0, 0]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlock { index: 0, .. }));
    }

    #[test]
    fn test_invalid_world_is_rejected() {
        let err = SceneConfig::from_toml_str("grid_size = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::World(WorldError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_unknown_syntax_is_parse_error() {
        let err = SceneConfig::from_toml_str("viewport = 'wide'").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env = EnvOverrides::from_lookup(|key| match key {
            "TILE_WORLD_FPS" => Some("60".into()),
            "TILE_WORLD_SCROLL_SPEED" => Some(" 4 ".into()),
            "TILE_WORLD_LOG_PATH" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(env.fps, Some(60));
        assert_eq!(env.scroll_speed, Some(4));
        assert_eq!(env.log_path, None);

        let scene = SceneConfig::default().with_overrides(&env);
        assert_eq!(scene.fps, 60);
        assert_eq!(scene.scroll_speed, 4);
    }

    #[test]
    fn test_zero_or_garbage_fps_is_ignored() {
        let env = EnvOverrides::from_lookup(|key| match key {
            "TILE_WORLD_FPS" => Some("0".into()),
            "TILE_WORLD_SCROLL_SPEED" => Some("fast".into()),
            _ => None,
        });
        assert_eq!(env, EnvOverrides::default());
    }

    #[test]
    fn test_demo_is_valid() {
        let demo = SceneConfig::demo();
        demo.validate().unwrap();
        assert!(demo.blocks.iter().all(|b| b.color.is_some()));
    }

    #[test]
    fn test_toml_roundtrip_keeps_placements() {
        let demo = SceneConfig::demo();
        let text = demo.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), demo);
    }

    #[test]
    fn test_repeats_past_coordinate_range_are_rejected() {
        let text = "[[blocks]]\nx = 2147483640\ny = 0\ncolor = [1, 2, 3]\ncount = 2\n";
        let err = SceneConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBlock { index: 0, .. }));

        let text = "[[blocks]]\nx = 2147483640\ny = 0\ncolor = [1, 2, 3]\n";
        assert!(SceneConfig::from_toml_str(text).is_ok());
    }

    #[test]
    fn test_apply_stops_repeats_at_coordinate_range() {
        use crate::core::{HeadlessPlatform, Unlimited};

        let mut scene = SceneConfig::default();
        scene.blocks = vec![BlockPlacement::color(i32::MAX - 40, 0, [1, 2, 3]).repeated(u32::MAX)];
        let mut world = World::with_limiter(
            scene.world_config(),
            HeadlessPlatform::new(),
            Unlimited::default(),
        )
        .unwrap();

        assert_eq!(scene.apply(&mut world), 0);
        // i32::MAX - 40 and i32::MAX - 8 fit, the next column does not.
        assert_eq!(world.sprites().len(), 2);
    }
}
