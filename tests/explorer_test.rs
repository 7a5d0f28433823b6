//! Tests for the traversal state machine, without any console I/O

use rstest::rstest;

use mansion::domain::{
    reference_mansion, Arrival, Command, Direction, ExploreState, Explorer, Mansion,
    MansionBuilder, Moves, Step,
};

/// Hall with two doors; the left room only has a left door.
///
/// ```text
/// Atrium
/// ├── [e] Corridor
/// │   └── [e] Pantry
/// └── [d] Study
/// ```
fn lopsided_mansion() -> Mansion {
    let mut b = MansionBuilder::new();
    let pantry = b.dead_end("Pantry").unwrap();
    let study = b.dead_end("Study").unwrap();
    let corridor = b.room("Corridor", Some(pantry), None).unwrap();
    let atrium = b.room("Atrium", Some(corridor), Some(study)).unwrap();
    b.build(atrium).unwrap()
}

fn name_of<'a>(explorer: &Explorer<'a>) -> &'a str {
    explorer.current_room().name.as_str()
}

#[rstest]
#[case('e', Command::Go(Direction::Left))]
#[case('E', Command::Go(Direction::Left))]
#[case('d', Command::Go(Direction::Right))]
#[case('D', Command::Go(Direction::Right))]
#[case('s', Command::Exit)]
#[case('S', Command::Exit)]
#[case('x', Command::Invalid('x'))]
#[case('1', Command::Invalid('1'))]
fn given_token_when_parsing_then_case_insensitive_command(
    #[case] token: char,
    #[case] expected: Command,
) {
    assert_eq!(Command::from_token(token), expected);
}

#[test]
fn given_two_door_room_when_left_then_right_then_reaches_left_right_grandchild() {
    let mansion = reference_mansion().unwrap();
    let mut explorer = Explorer::new(&mansion, mansion.entrance().unwrap()).unwrap();

    assert!(matches!(explorer.arrive(), Arrival::Choices(_)));
    assert!(matches!(
        explorer.apply(Command::Go(Direction::Left)),
        Step::Moved(_)
    ));
    assert_eq!(name_of(&explorer), "Sala de Jantar");

    assert!(matches!(explorer.arrive(), Arrival::Choices(_)));
    assert!(matches!(
        explorer.apply(Command::Go(Direction::Right)),
        Step::Moved(_)
    ));
    assert_eq!(name_of(&explorer), "Quarto Mestre");
}

#[test]
fn given_left_child_without_right_door_when_left_then_right_then_stays_put() {
    let mansion = lopsided_mansion();
    let mut explorer = Explorer::new(&mansion, mansion.entrance().unwrap()).unwrap();

    explorer.arrive();
    explorer.apply(Command::Go(Direction::Left));
    let corridor = explorer.current();
    explorer.arrive();
    let step = explorer.apply(Command::Go(Direction::Right));

    assert_eq!(step, Step::NoPath(Direction::Right));
    assert_eq!(explorer.current(), corridor);
    assert_eq!(explorer.state(), ExploreState::Positioned(corridor));

    // a third valid token moves on
    let step = explorer.apply(Command::Go(Direction::Left));
    assert!(matches!(step, Step::Moved(_)));
    assert_eq!(name_of(&explorer), "Pantry");
}

#[test]
fn given_room_with_only_left_door_when_arriving_then_offers_left_only() {
    let mansion = lopsided_mansion();
    let corridor = mansion.find_by_name("Corridor").unwrap();
    let mut explorer = Explorer::new(&mansion, corridor).unwrap();

    assert_eq!(
        explorer.arrive(),
        Arrival::Choices(Moves {
            left: true,
            right: false
        })
    );
}

#[test]
fn given_any_room_when_exit_then_user_exit_regardless_of_doors() {
    let mansion = reference_mansion().unwrap();
    let start = mansion.entrance().unwrap();
    let mut explorer = Explorer::new(&mansion, start).unwrap();

    explorer.arrive();
    let step = explorer.apply(Command::Exit);

    assert_eq!(step, Step::Exited);
    assert_eq!(explorer.state(), ExploreState::UserExit(start));
    assert!(explorer.is_finished());
}

#[test]
fn given_dead_end_start_when_arriving_then_terminal_dead_end() {
    let mansion = reference_mansion().unwrap();
    let adega = mansion.find_by_name("Adega").unwrap();
    let mut explorer = Explorer::new(&mansion, adega).unwrap();

    assert_eq!(explorer.arrive(), Arrival::DeadEnd);
    assert_eq!(explorer.state(), ExploreState::DeadEnd(adega));
    assert_eq!(explorer.apply(Command::Exit), Step::Finished);
}

#[test]
fn given_invalid_token_when_applying_then_position_unchanged() {
    let mansion = reference_mansion().unwrap();
    let start = mansion.entrance().unwrap();
    let mut explorer = Explorer::new(&mansion, start).unwrap();

    explorer.arrive();
    let step = explorer.apply(Command::Invalid('x'));

    assert_eq!(step, Step::Invalid('x'));
    assert_eq!(explorer.state(), ExploreState::Positioned(start));
}

#[test]
fn given_exhausted_input_when_abandoning_then_user_exit() {
    let mansion = lopsided_mansion();
    let start = mansion.entrance().unwrap();
    let mut explorer = Explorer::new(&mansion, start).unwrap();

    explorer.abandon();

    assert_eq!(explorer.state(), ExploreState::UserExit(start));
}
