use anyhow::Result;
use common::{GameState, GridError, Position, TickEvent, create_default_state};

/// Walking from every recorded tail must end on the recorded head.
fn assert_chains_consistent(state: &GameState) -> Result<()> {
    for snake_id in 0..state.num_snakes() {
        let snake = state.snake(snake_id)?;
        let body = state.snake_body(snake_id)?;
        assert_eq!(body.first(), Some(&snake.tail));
        assert_eq!(body.last(), Some(&snake.head));
        let head_char = state.board.at_pos(snake.head)?;
        if snake.is_alive {
            assert!("WASD".contains(head_char), "live head is {:?}", head_char);
        } else {
            assert_eq!(head_char, 'x');
        }
        assert!("wasd".contains(state.board.at_pos(snake.tail)?));
    }
    Ok(())
}

#[test]
fn test_move_into_empty_cell() -> Result<()> {
    let mut state = GameState::from_text(
        "#########\n\
         #       #\n\
         # d>>D  #\n\
         #       #\n\
         #########\n",
    )?;
    let length = state.snake_length(0)?;

    let report = state.update_state(|_| ())?;

    let snake = state.snake(0)?;
    assert!(snake.is_alive);
    assert_eq!(snake.head, Position::new(2, 6));
    assert_eq!(snake.tail, Position::new(2, 3));
    assert_eq!(state.board.at(2, 5)?, '>');
    assert_eq!(state.board.at(2, 2)?, ' ');
    assert_eq!(state.board.at(2, 3)?, 'd');
    assert_eq!(state.snake_length(0)?, length);
    assert_eq!(report.food_result, None);
    assert_eq!(
        report.events,
        vec![TickEvent::SnakeMoved {
            snake_id: 0,
            head: Position::new(2, 6),
            tail: Position::new(2, 3),
        }]
    );
    assert_chains_consistent(&state)?;

    Ok(())
}

#[test]
fn test_grow_on_food_calls_callback_once() -> Result<()> {
    let mut state = GameState::from_text(
        "#######\n\
         #d>D* #\n\
         #d>D* #\n\
         #######\n",
    )?;
    let mut calls = 0;

    let report = state.update_state(|s| {
        calls += 1;
        // Callback sees the state after every snake has moved
        assert_eq!(s.board.at(1, 4).unwrap(), 'D');
        assert_eq!(s.board.at(2, 4).unwrap(), 'D');
        "placed"
    })?;

    assert_eq!(calls, 1);
    assert_eq!(report.food_result, Some("placed"));
    assert!(report.food_eaten());
    for snake_id in 0..2 {
        let snake = state.snake(snake_id)?;
        assert_eq!(snake.tail, Position::new(snake_id + 1, 1));
        assert_eq!(snake.head, Position::new(snake_id + 1, 4));
        assert_eq!(state.snake_length(snake_id)?, 4);
    }
    assert_eq!(state.board.to_string(), "#######\n#d>>D #\n#d>>D #\n#######\n");
    assert_chains_consistent(&state)?;

    Ok(())
}

#[test]
fn test_death_on_wall_leaves_body() -> Result<()> {
    let mut state = GameState::from_text("#####\n#d>D#\n#####\n")?;

    let report = state.update_state(|_| ())?;

    let snake = state.snake(0)?;
    assert!(!snake.is_alive);
    assert_eq!(snake.head, Position::new(1, 3));
    assert_eq!(snake.tail, Position::new(1, 1));
    assert_eq!(state.board.to_string(), "#####\n#d>x#\n#####\n");
    assert_eq!(report.deaths().collect::<Vec<_>>(), vec![0]);

    // Dead snakes never move again
    let before = state.board.clone();
    let report = state.update_state(|_| ())?;
    assert!(report.events.is_empty());
    assert_eq!(state.board, before);
    assert_eq!(state.tick, 2);

    Ok(())
}

#[test]
fn test_death_on_own_body() -> Result<()> {
    let mut state = GameState::from_text(
        "######\n\
         #d>v #\n\
         # W< #\n\
         ######\n",
    )?;

    state.update_state(|_| ())?;

    let snake = state.snake(0)?;
    assert!(!snake.is_alive);
    assert_eq!(state.board.at(2, 2)?, 'x');
    assert_eq!(state.board.at(1, 1)?, 'd');
    assert_chains_consistent(&state)?;

    Ok(())
}

#[test]
fn test_death_on_other_snake() -> Result<()> {
    let mut state = GameState::from_text(
        "#######\n\
         #   s #\n\
         #   v #\n\
         #d>Dv #\n\
         #   S #\n\
         #     #\n\
         #######\n",
    )?;
    assert_eq!(state.num_snakes(), 2);

    state.update_state(|_| ())?;

    // The vertical snake's tail is found first in the scan, so it moves first
    let vertical = state.snake(0)?;
    assert!(vertical.is_alive);
    assert_eq!(vertical.head, Position::new(5, 4));
    assert_eq!(vertical.tail, Position::new(2, 4));

    let horizontal = state.snake(1)?;
    assert!(!horizontal.is_alive);
    assert_eq!(state.board.at(3, 3)?, 'x');
    assert_eq!(state.board.at(3, 1)?, 'd');
    assert_chains_consistent(&state)?;

    Ok(())
}

#[test]
fn test_head_leaving_grid_dies() -> Result<()> {
    let mut state = GameState::from_text("d>D\n")?;

    state.update_state(|_| ())?;

    assert!(!state.snake(0)?.is_alive);
    assert_eq!(state.board.to_string(), "d>x\n");

    Ok(())
}

#[test]
fn test_earlier_snake_vacates_cell_for_later_snake() -> Result<()> {
    let text = "######\n\
                #d>D #\n\
                #W   #\n\
                #w   #\n\
                ######\n";
    let mut state = GameState::from_text(text)?;
    assert_eq!(state.snake(0)?.tail, Position::new(1, 1));
    assert_eq!(state.snake(1)?.tail, Position::new(3, 1));

    state.update_state(|_| ())?;

    // Snake 0 left (1,1) before snake 1 looked at it
    assert_eq!(state.board.to_string(), "######\n#Wd>D#\n#w   #\n#    #\n######\n");
    assert!(state.snake(0)?.is_alive);
    assert!(state.snake(1)?.is_alive);
    assert_eq!(state.snake(1)?.head, Position::new(1, 1));
    assert_eq!(state.snake(1)?.tail, Position::new(2, 1));
    assert_chains_consistent(&state)?;

    // Reversed order: snake 1 now meets snake 0's tail and dies
    let mut reversed = GameState::from_text(text)?;
    reversed.snakes.swap(0, 1);
    reversed.update_state(|_| ())?;
    assert!(!reversed.snake(0)?.is_alive);
    assert!(reversed.snake(1)?.is_alive);
    assert_eq!(reversed.board.to_string(), "######\n# d>D#\n#x   #\n#w   #\n######\n");

    // Same order gives the same outcome every time
    let mut again = GameState::from_text(text)?;
    again.update_state(|_| ())?;
    assert_eq!(again, state);

    Ok(())
}

#[test]
fn test_tail_about_to_move_still_blocks() -> Result<()> {
    let mut state = GameState::from_text(
        "#########\n\
         #d>Dd>D #\n\
         #########\n",
    )?;

    state.update_state(|_| ())?;

    // Snake 1's tail would have moved away later in the tick
    assert!(!state.snake(0)?.is_alive);
    assert!(state.snake(1)?.is_alive);
    assert_eq!(state.board.to_string(), "#########\n#d>x d>D#\n#########\n");

    Ok(())
}

#[test]
fn test_failed_tick_rolls_back() -> Result<()> {
    let mut state = GameState::from_text("#######\n#d>D  #\n#d>D  #\n#######\n")?;
    // Break the second snake's record so its tick fails after the first moved
    state.snakes[1].tail = Position::new(2, 4);
    let before = state.clone();

    let err = state.update_state(|_| ()).unwrap_err();

    assert!(matches!(err, GridError::InvalidCellTransition { .. }));
    assert_eq!(state, before);

    Ok(())
}

#[test]
fn test_default_state_runs() -> Result<()> {
    let mut state = create_default_state()?;
    assert_eq!(state.num_rows(), 18);
    assert_eq!(state.num_snakes(), 1);
    let snake = *state.snake(0)?;
    assert_eq!(snake.tail, Position::new(2, 2));
    assert_eq!(snake.head, Position::new(2, 4));
    assert!(snake.is_alive);

    let mut food_ticks = Vec::new();
    for _ in 0..5 {
        let report = state.update_state(|s| {
            s.board.set(5, 5, '*').unwrap();
        })?;
        if report.food_eaten() {
            food_ticks.push(report.tick);
        }
        assert_chains_consistent(&state)?;
    }

    // Food sits five cells ahead of the head
    assert_eq!(food_ticks, vec![5]);
    assert_eq!(state.snake_length(0)?, 4);
    assert_eq!(state.board.at(5, 5)?, '*');

    Ok(())
}
