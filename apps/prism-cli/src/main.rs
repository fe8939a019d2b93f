use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};
use prism_common::{Color, Transform};
use prism_input::{KeyEventKind, KeyInput, KeyMask, KeySink, Modifiers, handler};
use prism_module::GraphicsModule;
use prism_render::{RecordingBackend, RenderConfig};
use prism_scene::{Hidden, Player, SceneWorld, StaticMesh, kind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism-cli", about = "Headless driver for the prism graphics module")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render a demo world into a recording backend
    Render {
        /// Number of frames to render
        #[arg(short, long, default_value = "1")]
        frames: u32,
        /// Number of mesh entities to spawn
        #[arg(short, long, default_value = "3")]
        entities: usize,
        /// Render configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Skip loading the world, exercising the diagnostic path
        #[arg(long)]
        no_world: bool,
    },
    /// Feed typed text through demo keyboard bindings
    Keys {
        /// Text to type, one key per character
        #[arg(default_value = "Hi!")]
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("prism-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", prism_render::crate_info());
            println!("input: {}", prism_input::crate_info());
            println!("scene: {}", prism_scene::crate_info());
            println!("module: {}", prism_module::crate_info());
        }
        Commands::Render {
            frames,
            entities,
            config,
            no_world,
        } => {
            let config = match config {
                Some(path) => RenderConfig::load(&path)?,
                None => RenderConfig::default(),
            };
            let mut module = GraphicsModule::new(config);

            let world = demo_world(entities);
            let player = Rc::new(Player::at(Vec3::new(0.0, -2.0, -8.0)));
            if !no_world {
                module.load_world(&world)?;
                module.set_player(player.clone());
            }

            let mut gfx = RecordingBackend::new();
            for frame in 0..frames {
                gfx.clear();
                player.set_position(Some(Vec3::new(0.0, -2.0, -8.0 - frame as f32)));
                let stats = module.render_frame(&mut gfx);
                println!(
                    "frame {frame}: seen={}, drawn={}, no_data={}, no_renderer={}, vertices={}, diagnostic={}, calls={}",
                    stats.objects_seen,
                    stats.objects_drawn,
                    stats.skipped_no_data,
                    stats.skipped_no_renderer,
                    stats.vertices,
                    stats.diagnostic,
                    gfx.calls().len()
                );
            }
        }
        Commands::Keys { text } => {
            let module = GraphicsModule::default();
            module.add_keyboard_binding(
                handler(|key, mods| println!("  key down: code={key} mods={mods:#x}")),
                KeyMask::kind(KeyEventKind::KeyDown),
            );
            module.add_keyboard_binding(
                handler(|key, _| println!("  shifted: code={key}")),
                KeyMask::modifiers(Modifiers::SHIFT),
            );
            module.add_keyboard_binding(
                handler(|key, _| {
                    let ch = char::from_u32(key).unwrap_or(char::REPLACEMENT_CHARACTER);
                    println!("  char: {ch:?}");
                }),
                KeyMask::kind(KeyEventKind::KeyPress),
            );

            for ch in text.chars() {
                println!("typing {ch:?}");
                let input = KeyInput {
                    shift: ch.is_uppercase() || ch.is_ascii_punctuation(),
                    ..KeyInput::new(ch.to_ascii_lowercase() as u32)
                };
                let mut fired = module.key_down(&input);
                fired += module.key_press(ch);
                fired += module.key_up(&input);
                tracing::debug!(fired, "key handled");
            }
        }
    }

    Ok(())
}

/// A realm of colored triangles on a line, spinning by index, plus one
/// object that never renders.
fn demo_world(entities: usize) -> SceneWorld {
    let world = SceneWorld::new();
    let realm = world.add_realm("demo");
    let mesh = kind(
        StaticMesh::new(vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0])
            .with_colors(vec![Color::RED, Color::GREEN, Color::BLUE]),
    );
    for i in 0..entities {
        realm.spawn(
            Transform {
                position: Vec3::new(i as f32 * 1.5, 0.0, 0.0),
                rotation: Quat::from_rotation_z(i as f32 * 0.25),
                ..Transform::default()
            },
            Rc::clone(&mesh),
        );
    }
    realm.spawn(Transform::default(), kind(Hidden));
    world
}
