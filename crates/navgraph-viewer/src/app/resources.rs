use bevy::prelude::Resource;
use navgraph_core::decor::{CursorTrail, DigitalRain, Spikes, Starfield, Typewriter};
use navgraph_core::{Backdrop, FrameView};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::app::boundary::SurfaceBoundary;
use crate::util::config::ViewerConfig;

pub const TITLE_TEXT: &str = "Hey There!!";

#[derive(Resource, Clone)]
pub struct ViewerCfg(pub ViewerConfig);

/// The graph surface and what it produced this frame.
#[derive(Resource, Default)]
pub struct SceneState {
    pub boundary: SurfaceBoundary<Backdrop>,
    pub view: Option<FrameView>,
    pub instance: u64,
    pub needs_respawn: bool,
    pub remount_requested: bool,
}

/// Runtime toggles, seeded from the config file.
#[derive(Resource, Clone)]
pub struct ViewerSettings {
    pub show_edges: bool,
    pub show_starfield: bool,
    pub show_spikes: bool,
    pub show_rain: bool,
    pub show_cursor: bool,
    pub show_hud: bool,
    pub help_open: bool,
}

impl ViewerSettings {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self {
            show_edges: cfg.show_edges,
            show_starfield: cfg.show_starfield,
            show_spikes: cfg.show_spikes,
            show_rain: cfg.show_rain,
            show_cursor: cfg.show_cursor,
            show_hud: cfg.show_hud,
            help_open: false,
        }
    }
}

#[derive(Resource)]
pub struct DecorState {
    pub starfield: Starfield,
    pub spikes: Spikes,
    pub rain: DigitalRain,
    pub cursor: CursorTrail,
    pub title: Typewriter,
    pub hovered: Option<usize>,
    pub rng: ChaCha8Rng,
}

impl DecorState {
    pub fn new(cfg: &ViewerConfig) -> Self {
        let mut rng = match cfg.graph.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            starfield: Starfield::generate(
                cfg.star_count,
                navgraph_core::decor::starfield::STAR_BOX_SIDE,
                &mut rng,
            ),
            spikes: Spikes::generate(cfg.spike_count, &mut rng),
            rain: DigitalRain::default(),
            cursor: CursorTrail::default(),
            title: Typewriter::new(TITLE_TEXT, 0.0),
            hovered: None,
            rng,
        }
    }
}
