//! Plays one scripted match in a single area and prints what an observer
//! would see after every command. Time is simulated, so the run is instant.
//!
//! ```text
//! RUST_LOG=sketchduel=debug,scripted_match=info cargo run -p scripted-match
//! ```

use std::sync::Arc;
use std::time::Duration;

use sketchduel::prelude::*;

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

fn ring(radius: i32) -> Vec<Pixel> {
    let mut pixels = Vec::new();
    for x in -radius..=radius {
        for y in -radius..=radius {
            let d = x * x + y * y;
            if (radius - 1) * (radius - 1) <= d && d <= radius * radius {
                pixels.push(Pixel::new(x, y));
            }
        }
    }
    pixels
}

fn block(side: i32) -> Vec<Pixel> {
    (0..side)
        .flat_map(|x| (0..side).map(move |y| Pixel::new(x, y)))
        .collect()
}

fn library() -> StaticShapeLibrary {
    let mut library = StaticShapeLibrary::new();
    library.insert(ShapeTitle::Circle, ring(6));
    library.insert(ShapeTitle::Square, block(8));
    library.insert(ShapeTitle::Star, ring(3));
    library
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

async fn step(
    areas: &AreaManager,
    area: AreaId,
    who: &Participant,
    command: Command,
) -> Result<CommandResponse, SketchDuelError> {
    let kind = command.kind();
    match areas.handle(area, command, who.clone()).await {
        Ok(response) => {
            tracing::info!(player = %who.name, command = kind, ?response, "accepted");
            Ok(response)
        }
        Err(err) => {
            tracing::warn!(player = %who.name, command = kind, code = %err.code(), %err, "rejected");
            Err(err.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), SketchDuelError> {
    sketchduel::init_tracing_with_default("sketchduel=info,scripted_match=info");

    let clock = ManualClock::new();
    let mut areas = AreaManager::new(
        AreaConfig::default(),
        Arc::new(library()),
        Arc::new(clock.clone()),
    )?;
    let area = areas.create_area_with_picker(RandomPicker::seeded(2024));

    let (_, mut updates) = areas.subscribe(area).await?;
    let watcher = tokio::spawn(async move {
        while let Some(snapshot) = updates.recv().await {
            match serde_json::to_string(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => tracing::error!(%err, "snapshot not serializable"),
            }
        }
    });

    let alice = Participant::new(PlayerId(1), "Alice");
    let bob = Participant::new(PlayerId(2), "Bob");
    let carol = Participant::new(PlayerId(3), "Carol");

    let CommandResponse::Joined { session_id } =
        step(&areas, area, &alice, Command::JoinSession).await?
    else {
        tracing::error!("join did not return a session");
        return Ok(());
    };
    step(&areas, area, &bob, Command::JoinSession).await?;
    // A third participant only gets to watch.
    let _ = step(&areas, area, &carol, Command::JoinSession).await;

    step(&areas, area, &alice, Command::StartSession { session_id }).await?;

    let snapshot = areas.snapshot(area).await?;
    let reference = snapshot
        .session
        .and_then(|s| s.reference)
        .map(|shape| shape.pixels)
        .unwrap_or_default();
    tracing::info!(pixels = reference.len(), "reference dealt");

    // Alice traces the reference, Bob scribbles a diagonal.
    let half = reference.len() / 2;
    let scribble: Vec<Pixel> = (0..12).map(|i| Pixel::new(i, i)).collect();
    let script = [
        (2, &alice, PlayerSlot::One, reference[..half].to_vec()),
        (3, &bob, PlayerSlot::Two, scribble[..6].to_vec()),
        (4, &alice, PlayerSlot::One, reference.clone()),
        (5, &bob, PlayerSlot::Two, scribble.clone()),
    ];
    for (secs, who, slot, pixels) in script {
        clock.advance(Duration::from_secs(secs));
        let submission = Move {
            player_slot: slot,
            pixels,
        };
        step(
            &areas,
            area,
            who,
            Command::SubmitPixels {
                session_id,
                submission,
            },
        )
        .await?;
    }

    for row in areas.area(area)?.leaderboard().await? {
        tracing::info!(
            name = %row.name,
            difficulty = %row.difficulty,
            wins = row.wins,
            losses = row.losses,
            best_accuracy = row.best_accuracy,
            "leaderboard"
        );
    }

    areas.destroy_area(area).await?;
    let _ = watcher.await;
    Ok(())
}
