//! Integration tests for area actors and the area manager.

use std::sync::Arc;
use std::time::Duration;

use sketchduel_area::{AreaConfig, AreaError, AreaManager, Participant};
use sketchduel_game::{DifficultyCatalog, DifficultyTier, ManualClock, StaticShapeLibrary};
use sketchduel_protocol::{
    AreaId, Command, CommandResponse, ErrorCode, Move, Pixel, PlayerId, PlayerSlot, SessionId,
    SessionStatus, ShapeTitle,
};

// =========================================================================
// Helpers
// =========================================================================

fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

fn alice() -> Participant {
    Participant::new(pid(1), "Alice")
}

fn bob() -> Participant {
    Participant::new(pid(2), "Bob")
}

fn px(points: &[(i32, i32)]) -> Vec<Pixel> {
    points.iter().copied().map(Pixel::from).collect()
}

/// Easy deals a Circle `(0,0) (1,1) (2,2)` with a 20 second budget.
fn manager(clock: &ManualClock) -> AreaManager {
    let config = AreaConfig {
        catalog: DifficultyCatalog::new(
            DifficultyTier::new([ShapeTitle::Circle], 20.0),
            DifficultyTier::new([ShapeTitle::House], 15.0),
            DifficultyTier::new([ShapeTitle::Car], 30.0),
        )
        .unwrap(),
        channel_size: 8,
    };
    let library =
        StaticShapeLibrary::new().with(ShapeTitle::Circle, px(&[(0, 0), (1, 1), (2, 2)]));
    AreaManager::new(config, Arc::new(library), Arc::new(clock.clone())).unwrap()
}

async fn join(mgr: &AreaManager, area: AreaId, who: Participant) -> SessionId {
    match mgr.handle(area, Command::JoinSession, who).await.unwrap() {
        CommandResponse::Joined { session_id } => session_id,
        other => panic!("expected Joined, got {other:?}"),
    }
}

fn submit(session_id: SessionId, slot: PlayerSlot, points: &[(i32, i32)]) -> Command {
    Command::SubmitPixels {
        session_id,
        submission: Move {
            player_slot: slot,
            pixels: px(points),
        },
    }
}

// =========================================================================
// AreaManager
// =========================================================================

#[tokio::test]
async fn test_create_area_returns_unique_ids() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);

    let a1 = mgr.create_area();
    let a2 = mgr.create_area();

    assert_ne!(a1, a2);
    assert_eq!(mgr.area_count(), 2);
    assert_eq!(mgr.area_ids().len(), 2);
}

#[tokio::test]
async fn test_new_rejects_zero_channel() {
    let clock = ManualClock::new();
    let config = AreaConfig {
        channel_size: 0,
        ..AreaConfig::default()
    };

    let result = AreaManager::new(
        config,
        Arc::new(StaticShapeLibrary::new()),
        Arc::new(clock),
    );

    assert!(result.is_err());
}

#[tokio::test]
async fn test_handle_unknown_area_not_found() {
    let clock = ManualClock::new();
    let mgr = manager(&clock);

    let err = mgr
        .handle(AreaId(u64::MAX), Command::JoinSession, alice())
        .await
        .unwrap_err();

    assert!(matches!(err, AreaError::NotFound(_)));
    assert_eq!(err.code(), ErrorCode::AreaNotFound);
}

#[tokio::test]
async fn test_destroy_area_then_handle_fails() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();
    let handle = mgr.area(area).unwrap();

    mgr.destroy_area(area).await.unwrap();

    assert_eq!(mgr.area_count(), 0);
    assert!(matches!(
        mgr.snapshot(area).await,
        Err(AreaError::NotFound(_))
    ));
    // The old handle sees a stopped actor.
    let err = handle.snapshot().await.unwrap_err();
    assert!(matches!(err, AreaError::Unavailable(id) if id == area));
}

#[tokio::test]
async fn test_destroy_area_twice_not_found() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();

    mgr.destroy_area(area).await.unwrap();

    assert!(matches!(
        mgr.destroy_area(area).await,
        Err(AreaError::NotFound(_))
    ));
}

// =========================================================================
// Matches through the actor
// =========================================================================

#[tokio::test]
async fn test_full_match_broadcasts_and_records() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();
    let (initial, mut updates) = mgr.subscribe(area).await.unwrap();
    assert!(initial.session.is_none());

    let session_id = join(&mgr, area, alice()).await;
    assert_eq!(join(&mgr, area, bob()).await, session_id);
    mgr.handle(area, Command::StartSession { session_id }, alice())
        .await
        .unwrap();

    clock.advance(Duration::from_secs(5));
    mgr.handle(area, submit(session_id, PlayerSlot::Two, &[(9, 9)]), bob())
        .await
        .unwrap();
    clock.advance(Duration::from_secs(20));
    mgr.handle(
        area,
        submit(session_id, PlayerSlot::One, &[(0, 0), (1, 1), (2, 2)]),
        alice(),
    )
    .await
    .unwrap();

    let mut received = Vec::new();
    while let Ok(snapshot) = updates.try_recv() {
        received.push(snapshot);
    }
    assert_eq!(received.len(), 5);

    let last = received.last().unwrap();
    let session = last.session.as_ref().unwrap();
    assert_eq!(session.status, SessionStatus::Over);
    assert_eq!(session.winner, Some(pid(1)));
    assert_eq!(session.player1_accuracy, Some(1.0));
    assert_eq!(last.history.len(), 1);
    assert_eq!(last.history[0].scores["Alice"].win, 1);
    assert_eq!(last.history[0].scores["Bob"].win, 0);

    let board = mgr.area(area).unwrap().leaderboard().await.unwrap();
    assert_eq!(board[0].name, "Alice");
    assert_eq!(board[0].wins, 1);
}

#[tokio::test]
async fn test_failed_command_not_broadcast() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();
    let session_id = join(&mgr, area, alice()).await;
    let (before, mut updates) = mgr.subscribe(area).await.unwrap();

    let err = mgr
        .handle(area, Command::StartSession { session_id }, alice())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidStatus);
    assert!(updates.try_recv().is_err());
    assert_eq!(mgr.snapshot(area).await.unwrap(), before);
}

#[tokio::test]
async fn test_handle_encoded_through_manager() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();

    let response = mgr
        .handle_encoded(area, br#"{"type":"JoinSession"}"#.to_vec(), alice())
        .await
        .unwrap();
    let session_id = match response {
        CommandResponse::Joined { session_id } => session_id,
        other => panic!("expected Joined, got {other:?}"),
    };

    let bytes = format!(r#"{{"type":"LeaveSession","session_id":{}}}"#, session_id.0);
    let response = mgr
        .handle_encoded(area, bytes.into_bytes(), alice())
        .await
        .unwrap();
    assert_eq!(response, CommandResponse::Ack);

    let err = mgr
        .handle_encoded(area, br#"{"type":"Teleport"}"#.to_vec(), alice())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCommand);
}

#[tokio::test]
async fn test_areas_are_independent() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let a1 = mgr.create_area();
    let a2 = mgr.create_area();

    let s1 = join(&mgr, a1, alice()).await;
    let s2 = join(&mgr, a2, alice()).await;

    assert_ne!(s1, s2);
    let err = mgr
        .handle(a2, Command::LeaveSession { session_id: s1 }, alice())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameIdMismatch);
}

#[tokio::test]
async fn test_concurrent_joins_fill_both_seats_once() {
    let clock = ManualClock::new();
    let mut mgr = manager(&clock);
    let area = mgr.create_area();
    let handle = mgr.area(area).unwrap();

    let mut tasks = Vec::new();
    for id in 1..=6 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .handle(Command::JoinSession, Participant::new(pid(id), format!("p{id}")))
                .await
        }));
    }
    let mut joined = 0;
    let mut full = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => joined += 1,
            Err(err) => {
                assert_eq!(err.code(), ErrorCode::SessionFull);
                full += 1;
            }
        }
    }

    assert_eq!((joined, full), (2, 4));
    let session = mgr.snapshot(area).await.unwrap().session.unwrap();
    assert_eq!(session.status, SessionStatus::InProgress);
    assert!(session.player1.is_some() && session.player2.is_some());
}
