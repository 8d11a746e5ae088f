use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tour_core::{
    load_tour, try_load, Hotspot, ModalContent, PanoramaScene, PanoramaViewer, ResolutionMode,
    ResolvedTour, SceneRuntime, ViewListener, ViewParameters, ViewerSession,
};

#[derive(Parser)]
#[command(name = "tour")]
#[command(about = "Inspect and walk panorama tour documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tour document without falling back
    Check {
        /// Tour JSON file
        file: PathBuf,
    },

    /// Print the resolved runtime of every scene as JSON
    Scenes {
        /// Tour JSON file (the built-in fallback tour is used if it fails to load)
        file: PathBuf,
    },

    /// Build a headless session and visit every navigable scene
    Walk {
        /// Tour JSON file (the built-in fallback tour is used if it fails to load)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Scenes { file } => scenes(&file),
        Commands::Walk { file } => walk(&file),
    }
}

fn check(file: &Path) -> Result<()> {
    let tour = try_load(std::fs::read_to_string(file))
        .map_err(|e| anyhow::anyhow!("{}: {e}", file.display()))?;
    let tour = ResolvedTour::resolve(tour);
    let mut renderable = 0;
    for scene in &tour.scenes {
        match ResolutionMode::Strict.resolve(scene) {
            Some(_) => renderable += 1,
            None => println!("  excluded: {} ({})", scene.id, scene.name),
        }
    }
    println!(
        "{}: {} scene(s), {} renderable",
        file.display(),
        tour.scenes.len(),
        renderable
    );
    Ok(())
}

fn scenes(file: &Path) -> Result<()> {
    let tour = ResolvedTour::resolve(load_tour(std::fs::read_to_string(file)));
    let resolved: Vec<serde_json::Value> = tour
        .scenes
        .iter()
        .map(|scene| {
            serde_json::json!({
                "id": scene.id,
                "name": scene.name,
                "runtime": ResolutionMode::Strict.resolve(scene),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn walk(file: &Path) -> Result<()> {
    let tour = ResolvedTour::resolve(load_tour(std::fs::read_to_string(file)));
    let mut session = ViewerSession::build(HeadlessViewer, tour);
    if !session.has_content() {
        println!("tour has no content to show");
        return Ok(());
    }
    println!("resolution mode: {:?}", session.mode());
    for index in 0..session.len() {
        session.switch_scene(index);
        let Some(scene) = session.current() else {
            continue;
        };
        let view = session.current_view().unwrap_or_default();
        println!(
            "[{index}] {} '{}' yaw={:.3} pitch={:.3} fov={:.3} hotspots={}",
            scene.id,
            scene.name,
            view.yaw,
            view.pitch,
            view.fov,
            scene.hotspots.len()
        );
        for (h, hotspot) in scene.hotspots.iter().enumerate() {
            if let Some(modal) = session.modal_for(index, h) {
                print_modal(hotspot, &modal);
            }
        }
    }
    Ok(())
}

fn print_modal(hotspot: &Hotspot, modal: &ModalContent) {
    println!("    {} \"{}\"", hotspot.id, modal.title);
    for section in &modal.sections {
        println!("      {}: {:?}", section.heading, section.entry);
    }
}

/// Renders nothing; keeps view state so sessions can be driven from a terminal.
struct HeadlessViewer;

impl PanoramaViewer for HeadlessViewer {
    type Scene = HeadlessScene;
    type Error = anyhow::Error;

    fn create_scene(&self, runtime: &SceneRuntime, initial: ViewParameters) -> Result<HeadlessScene> {
        log::debug!("[headless] scene geometry cube={}", runtime.geometry.is_cube());
        Ok(HeadlessScene {
            state: Rc::new(RefCell::new(ViewState {
                params: initial,
                listeners: Vec::new(),
            })),
        })
    }

    fn enable_orientation_control(&self) {}

    fn disable_orientation_control(&self) {}
}

struct ViewState {
    params: ViewParameters,
    listeners: Vec<ViewListener>,
}

#[derive(Clone)]
struct HeadlessScene {
    state: Rc<RefCell<ViewState>>,
}

impl PanoramaScene for HeadlessScene {
    type Hotspot = String;

    fn switch_to(&self) {}

    fn view_parameters(&self) -> ViewParameters {
        self.state.borrow().params
    }

    fn set_view_parameters(&self, params: ViewParameters) {
        let mut listeners = {
            let mut state = self.state.borrow_mut();
            state.params = params;
            std::mem::take(&mut state.listeners)
        };
        for listener in &mut listeners {
            listener(params);
        }
        self.state.borrow_mut().listeners.append(&mut listeners);
    }

    fn create_hotspot(&self, hotspot: &Hotspot) -> Option<String> {
        Some(hotspot.id.clone())
    }

    fn set_hotspot_scale(&self, hotspot: &String, scale: f64) {
        log::trace!("[headless] {hotspot} scale {scale:.3}");
    }

    fn on_view_change(&self, listener: ViewListener) {
        self.state.borrow_mut().listeners.push(listener);
    }
}
