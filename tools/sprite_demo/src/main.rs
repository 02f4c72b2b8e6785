// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! sprite-demo: drives the sprite engine headless and prints collisions.
//!
//! Usage:
//! sprite-demo
//! sprite-demo --sprites 24 --frames 120 --seed 7
//! sprite-demo --config sprite.toml --scroll 10

use clap::{value_parser, Arg, ArgMatches, Command};
use log::info;
use pixel_sprite::{
    init::{init_sprite_engine, EngineConfig},
    log::{init_log, level_from_str},
    render::{DrawFlags, ScrollFill, SpriteEngine, SurfaceTable},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SCREEN_W: i32 = 320;
const SCREEN_H: i32 = 200;
const SPRITE_SIZE: i32 = 8;

struct Mover {
    id: usize,
    dx: i32,
    dy: i32,
}

fn make_parser() -> ArgMatches {
    Command::new("sprite-demo")
        .author("zipxing@hotmail.com")
        .about("Bouncing sprites with collision report")
        .arg(Arg::new("config").short('c').long("config"))
        .arg(
            Arg::new("sprites")
                .short('n')
                .long("sprites")
                .value_parser(value_parser!(usize))
                .default_value("16"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_parser(value_parser!(u32))
                .default_value("60"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("1"),
        )
        .arg(
            Arg::new("scroll")
                .long("scroll")
                .help("scroll the playfield every N frames, 0 disables")
                .value_parser(value_parser!(u32))
                .default_value("0"),
        )
        .get_matches()
}

fn spawn(
    table: &mut SurfaceTable,
    engine: &mut SpriteEngine,
    screen: usize,
    rng: &mut StdRng,
    count: usize,
) -> Result<Vec<Mover>, Box<dyn std::error::Error>> {
    let mut movers = vec![];
    for i in 0..count {
        let id = table.create_sprite(SPRITE_SIZE, SPRITE_SIZE)?;
        table.get_mut(id)?.pixels.fill(1 + (i % 15) as u8);
        let x = rng.random_range(0..SCREEN_W - SPRITE_SIZE);
        let y = rng.random_range(0..SCREEN_H - SPRITE_SIZE);
        // every fourth sprite sits on the scrolling playfield
        let layer = if i % 4 == 0 { 0 } else { 1 + (i % 3) as u8 };
        engine.show_safe(table, id, screen, x, y, layer, DrawFlags::empty(), false)?;
        movers.push(Mover {
            id,
            dx: rng.random_range(-3..=3),
            dy: rng.random_range(-3..=3),
        });
    }
    Ok(movers)
}

fn step(
    table: &mut SurfaceTable,
    engine: &mut SpriteEngine,
    movers: &mut [Mover],
) -> Result<(), Box<dyn std::error::Error>> {
    for m in movers.iter_mut() {
        let Some(p) = table.get(m.id)?.pos else {
            continue;
        };
        if p.x + m.dx < 0 || p.x + m.dx > SCREEN_W - SPRITE_SIZE {
            m.dx = -m.dx;
        }
        if p.y + m.dy < 0 || p.y + m.dy > SCREEN_H - SPRITE_SIZE {
            m.dy = -m.dy;
        }
        engine.set_next_position(table, m.id, Some(p.x + m.dx), Some(p.y + m.dy))?;
    }
    engine.move_sprites(table)?;
    Ok(())
}

fn report(
    frame: u32,
    table: &SurfaceTable,
    engine: &SpriteEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let hit = engine.collided_sprites(table)?;
    if hit.is_empty() {
        return Ok(());
    }
    let mut line = format!("frame {:>4}:", frame);
    for id in hit {
        let codes: Vec<String> = engine
            .collisions(table, id)?
            .iter()
            .map(|c| c.encode().to_string())
            .collect();
        line.push_str(&format!(" {}->[{}]", id, codes.join(",")));
    }
    println!("{}", line);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = make_parser();
    let config = match args.get_one::<String>("config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(file) = &config.log_file {
        init_log(level_from_str(&config.log_level), file)?;
    }

    let count = *args.get_one::<usize>("sprites").unwrap_or(&16);
    let frames = *args.get_one::<u32>("frames").unwrap_or(&60);
    let seed = *args.get_one::<u64>("seed").unwrap_or(&1);
    let scroll_every = *args.get_one::<u32>("scroll").unwrap_or(&0);

    let (mut table, mut engine) = init_sprite_engine(&config)?;
    let screen = table.create_window(SCREEN_W, SCREEN_H)?;
    engine.set_write_surface(&table, screen)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut movers = spawn(&mut table, &mut engine, screen, &mut rng, count)?;
    engine.update_all_collisions(&mut table)?;
    info!("sprite-demo: {} sprites, {} frames", movers.len(), frames);

    for frame in 1..=frames {
        step(&mut table, &mut engine, &mut movers)?;
        if scroll_every > 0 && frame % scroll_every == 0 {
            engine.scroll(&mut table, 4, 0, ScrollFill::Wrap)?;
        }
        report(frame, &table, &engine)?;
    }

    engine.destroy_all(&mut table)?;
    Ok(())
}
