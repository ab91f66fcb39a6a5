use battleship_rules::Orientation::{self, Horizontal, Vertical};
use battleship_rules::{
    Coord, Fleet, GameConfig, GameEngine, GameStatus, PlayerId, RulesError, ShipType, Shot,
    ShotOutcome,
};

const CARRIER: &str = "Carrier";

fn classic_engine() -> GameEngine {
    GameEngine::with_config(GameConfig::new(10, Fleet::classic()).unwrap()).unwrap()
}

fn place(
    engine: &mut GameEngine,
    player: PlayerId,
    ship: &str,
    row: usize,
    col: usize,
    o: Orientation,
) {
    let start = Coord::new(row, col);
    engine.validate_placement(player, ship, start, o).unwrap();
    engine.place_ship(player, ship, start, o).unwrap();
}

#[test]
fn carrier_scenario() {
    let mut engine = GameEngine::new();
    place(&mut engine, PlayerId::One, CARRIER, 0, 0, Horizontal);

    let cells: Vec<Coord> = engine.board(PlayerId::One).ship_cells().collect();
    assert_eq!(cells, (0..5).map(|c| Coord::new(0, c)).collect::<Vec<_>>());

    assert_eq!(
        engine.validate_placement(PlayerId::One, CARRIER, Coord::new(0, 3), Horizontal),
        Err(RulesError::Overlap(Coord::new(0, 3)))
    );
    assert!(matches!(
        engine.validate_placement(PlayerId::One, CARRIER, Coord::new(0, 6), Horizontal),
        Err(RulesError::OutOfBounds { .. })
    ));

    place(&mut engine, PlayerId::Two, CARRIER, 5, 5, Vertical);

    // Player 2 fires at Player 1's carrier.
    engine.validate_move(PlayerId::Two, Coord::new(0, 0)).unwrap();
    assert!(engine.apply_move(PlayerId::Two, Coord::new(0, 0)).is_hit());
    assert_eq!(
        engine.validate_move(PlayerId::Two, Coord::new(0, 0)),
        Err(RulesError::AlreadyShot(Coord::new(0, 0)))
    );
}

#[test]
fn unknown_ship_type_is_rejected() {
    let mut engine = GameEngine::new();
    let err = RulesError::UnknownShipType("Rowboat".into());
    assert_eq!(
        engine.validate_placement(PlayerId::One, "Rowboat", Coord::new(0, 0), Vertical),
        Err(err.clone())
    );
    assert_eq!(
        engine.place_ship(PlayerId::One, "Rowboat", Coord::new(0, 0), Vertical),
        Err(err)
    );
    assert_eq!(engine.board(PlayerId::One).ship_cells().count(), 0);
}

#[test]
fn out_of_bounds_by_one_cell() {
    let engine = GameEngine::new();
    // 5 + 5 = 10 fits exactly, 6 + 5 does not.
    assert!(engine
        .validate_placement(PlayerId::One, CARRIER, Coord::new(9, 5), Horizontal)
        .is_ok());
    assert_eq!(
        engine.validate_placement(PlayerId::One, CARRIER, Coord::new(6, 3), Vertical),
        Err(RulesError::OutOfBounds { row: 10, col: 3 })
    );
    assert_eq!(
        engine.validate_placement(PlayerId::One, CARRIER, Coord::new(10, 0), Horizontal),
        Err(RulesError::OutOfBounds { row: 10, col: 0 })
    );
}

#[test]
fn overlap_detected_across_orientations() {
    let mut engine = classic_engine();
    place(&mut engine, PlayerId::One, "Cruiser", 4, 2, Horizontal);
    assert_eq!(
        engine.validate_placement(PlayerId::One, "Destroyer", Coord::new(3, 3), Vertical),
        Err(RulesError::Overlap(Coord::new(4, 3)))
    );
    // The other player's board is independent.
    assert!(engine
        .validate_placement(PlayerId::Two, "Destroyer", Coord::new(3, 3), Vertical)
        .is_ok());
}

#[test]
fn validation_never_mutates() {
    let mut engine = GameEngine::new();
    place(&mut engine, PlayerId::One, CARRIER, 2, 2, Vertical);
    let before = format!("{:?}", engine);
    let _ = engine.validate_placement(PlayerId::One, CARRIER, Coord::new(2, 2), Horizontal);
    let _ = engine.validate_move(PlayerId::Two, Coord::new(2, 2));
    let _ = engine.parse_move(PlayerId::Two, "2, 2");
    assert_eq!(format!("{:?}", engine), before);
}

#[test]
fn placement_credits_the_opponent() {
    let mut engine = classic_engine();
    for (i, ship) in Fleet::classic().iter().enumerate() {
        place(&mut engine, PlayerId::One, ship.name(), i, 0, Horizontal);
    }
    assert!(engine.is_fleet_placed(PlayerId::One));
    assert!(!engine.is_fleet_placed(PlayerId::Two));
    assert_eq!(engine.hits_left(PlayerId::Two).len(), 17);
    assert!(engine.hits_left(PlayerId::One).is_empty());
    assert_eq!(
        engine
            .pending_ships(PlayerId::Two)
            .map(ShipType::name)
            .collect::<Vec<_>>(),
        vec!["Carrier", "Battleship", "Cruiser", "Submarine", "Destroyer"]
    );
}

// Shots resolve against the opponent's board. The shooter's own ships are
// never consulted, so firing at a cell that only the shooter occupies misses.
#[test]
fn shots_resolve_against_opponent_board() {
    let mut engine = GameEngine::new();
    place(&mut engine, PlayerId::One, CARRIER, 0, 0, Horizontal);
    place(&mut engine, PlayerId::Two, CARRIER, 9, 0, Horizontal);

    assert_eq!(engine.apply_move(PlayerId::One, Coord::new(0, 0)), ShotOutcome::Miss);
    assert_eq!(engine.shots(PlayerId::One).get(Coord::new(0, 0)), Some(Shot::Miss));
    assert_eq!(engine.apply_move(PlayerId::One, Coord::new(9, 0)), ShotOutcome::Hit);
    assert_eq!(engine.hits_left(PlayerId::One).len(), 4);
    assert_eq!(engine.hits_left(PlayerId::Two).len(), 5);
}

#[test]
fn win_after_every_cell_struck_once() {
    let mut engine = GameEngine::new();
    place(&mut engine, PlayerId::One, CARRIER, 3, 3, Vertical);
    place(&mut engine, PlayerId::Two, CARRIER, 0, 0, Horizontal);
    assert_eq!(engine.status(), GameStatus::InProgress);

    for col in 0..4 {
        engine.validate_move(PlayerId::One, Coord::new(0, col)).unwrap();
        assert_eq!(engine.apply_move(PlayerId::One, Coord::new(0, col)), ShotOutcome::Hit);
        assert!(!engine.check_win(PlayerId::One));
    }
    assert_eq!(engine.apply_move(PlayerId::One, Coord::new(5, 5)), ShotOutcome::Miss);
    assert!(!engine.check_win(PlayerId::One));

    assert_eq!(
        engine.apply_move(PlayerId::One, Coord::new(0, 4)),
        ShotOutcome::Sunk(CARRIER.to_string())
    );
    assert!(engine.check_win(PlayerId::One));
    assert!(engine.check_win(PlayerId::One));
    assert!(!engine.check_win(PlayerId::Two));
    assert_eq!(engine.status(), GameStatus::Won(PlayerId::One));
    assert_eq!(engine.ships_afloat(PlayerId::Two), 0);
    assert_eq!(engine.ships_afloat(PlayerId::One), 1);
}

#[test]
fn move_validation_errors() {
    let engine = GameEngine::new();
    assert_eq!(
        engine.validate_move(PlayerId::One, Coord::new(10, 0)),
        Err(RulesError::OutOfBounds { row: 10, col: 0 })
    );
    assert_eq!(
        engine.parse_move(PlayerId::One, "3"),
        Err(RulesError::MalformedCoordinate("3".into()))
    );
    assert_eq!(
        engine.parse_move(PlayerId::One, "a, b"),
        Err(RulesError::MalformedCoordinate("a, b".into()))
    );
    assert_eq!(
        engine.parse_move(PlayerId::One, "-1, 4"),
        Err(RulesError::OutOfBounds { row: -1, col: 4 })
    );
    assert_eq!(engine.parse_move(PlayerId::One, "3, 4"), Ok(Coord::new(3, 4)));
}

#[test]
fn sink_reported_per_ship() {
    let mut engine = classic_engine();
    place(&mut engine, PlayerId::Two, "Destroyer", 0, 0, Vertical);
    place(&mut engine, PlayerId::Two, "Submarine", 0, 1, Vertical);
    assert_eq!(engine.apply_move(PlayerId::One, Coord::new(0, 0)), ShotOutcome::Hit);
    assert_eq!(engine.apply_move(PlayerId::One, Coord::new(0, 1)), ShotOutcome::Hit);
    assert_eq!(
        engine.apply_move(PlayerId::One, Coord::new(1, 0)),
        ShotOutcome::Sunk("Destroyer".into())
    );
    assert_eq!(engine.ships_afloat(PlayerId::Two), 1);
}

#[test]
#[should_panic]
fn unvalidated_repeat_hit_panics() {
    let mut engine = GameEngine::new();
    place(&mut engine, PlayerId::Two, CARRIER, 0, 0, Horizontal);
    engine.apply_move(PlayerId::One, Coord::new(0, 0));
    engine.apply_move(PlayerId::One, Coord::new(0, 0));
}

#[test]
fn status_waits_for_both_fleets() {
    let mut engine = GameEngine::new();
    assert_eq!(engine.status(), GameStatus::InProgress);
    place(&mut engine, PlayerId::One, CARRIER, 0, 0, Horizontal);
    // Player 1 has nothing to hit yet, but the game has not started.
    assert!(engine.check_win(PlayerId::One));
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn rejects_config_that_cannot_fit() {
    let config = GameConfig {
        board_size: 3,
        fleet: Fleet::default(),
    };
    assert!(GameEngine::with_config(config).is_err());
}
