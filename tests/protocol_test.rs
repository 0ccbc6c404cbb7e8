//! Tests for directive parsing and wire message formatting.

use tictactoe_server::{Directive, GameError, Mark, Outbox, ServerMessage};

#[test]
fn test_parse_move() {
    assert_eq!(Directive::parse("MOVE 0"), Ok(Some(Directive::Move(0))));
    assert_eq!(Directive::parse("MOVE 8"), Ok(Some(Directive::Move(8))));
    // Range checking is the session's job; parsing just wants an integer.
    assert_eq!(Directive::parse("MOVE 12"), Ok(Some(Directive::Move(12))));
}

#[test]
fn test_parse_move_tolerates_whitespace() {
    assert_eq!(Directive::parse("  MOVE 3\n"), Ok(Some(Directive::Move(3))));
    assert_eq!(Directive::parse("MOVE   5"), Ok(Some(Directive::Move(5))));
}

#[test]
fn test_parse_quit() {
    assert_eq!(Directive::parse("QUIT"), Ok(Some(Directive::Quit)));
    assert_eq!(Directive::parse("QUIT now"), Ok(Some(Directive::Quit)));
}

#[test]
fn test_parse_malformed_move_is_invalid_input() {
    assert!(matches!(
        Directive::parse("MOVE five"),
        Err(GameError::InvalidInput(_))
    ));
    assert!(matches!(
        Directive::parse("MOVE -1"),
        Err(GameError::InvalidInput(_))
    ));
    assert!(matches!(
        Directive::parse("MOVE"),
        Err(GameError::InvalidInput(_))
    ));
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    assert_eq!(Directive::parse(""), Ok(None));
    assert_eq!(Directive::parse("HELLO"), Ok(None));
    assert_eq!(Directive::parse("move 3"), Ok(None));
}

#[test]
fn test_server_message_wire_format() {
    assert_eq!(ServerMessage::Welcome(Mark::X).to_string(), "WELCOME X");
    assert_eq!(ServerMessage::Welcome(Mark::O).to_string(), "WELCOME O");
    assert_eq!(
        ServerMessage::Message("your move".to_string()).to_string(),
        "MESSAGE your move"
    );
    assert_eq!(ServerMessage::ValidMove.to_string(), "VALID_MOVE");
    assert_eq!(
        ServerMessage::OpponentMoved(7).to_string(),
        "OPPONENT_MOVED 7"
    );
    assert_eq!(ServerMessage::Victory.to_string(), "VICTORY");
    assert_eq!(ServerMessage::Defeat.to_string(), "DEFEAT");
    assert_eq!(ServerMessage::Tie.to_string(), "TIE");
    assert_eq!(
        ServerMessage::OtherPlayerLeft.to_string(),
        "OTHER_PLAYER_LEFT"
    );
}

#[tokio::test]
async fn test_outbox_delivers_in_order() {
    let (outbox, mut rx) = Outbox::channel();
    outbox.send(ServerMessage::ValidMove).unwrap();
    outbox.send(ServerMessage::Victory).unwrap();
    assert_eq!(rx.recv().await, Some(ServerMessage::ValidMove));
    assert_eq!(rx.recv().await, Some(ServerMessage::Victory));
}

#[tokio::test]
async fn test_outbox_send_after_receiver_drop_is_channel_closed() {
    let (outbox, rx) = Outbox::channel();
    drop(rx);
    assert_eq!(
        outbox.send(ServerMessage::ValidMove),
        Err(GameError::ChannelClosed)
    );
    // Best-effort delivery swallows the failure.
    outbox.send_best_effort(ServerMessage::OtherPlayerLeft);
}
