// WebSocket connection, refusal, reconnection and teardown tests

use std::time::Duration;

use rummy_backend::RoomConfig;

use super::helpers::{connect, hand_of, public_player, seat_two};
use crate::support::test_server::start_test_server;
use crate::support::websocket_client::WebSocketClient;

#[actix_web::test]
async fn first_player_is_welcomed_into_a_waiting_room() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;

    let mut a = connect(&server.room_url("conn-waiting")).await?;
    let state = a.client.recv_state_in("waiting").await?;

    assert_eq!(state["roundNo"], 0);
    assert!(state["currentTurn"].is_null());
    assert_eq!(state["players"].as_array().map(Vec::len), Some(1));
    assert!(public_player(&state, &a.session_id).is_some());
    assert_eq!(server.state.rooms.room_count(), 1);

    a.client.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn filling_the_room_deals_private_hands() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;

    let (mut a, mut b, dealt) = seat_two(&server, "conn-deal").await?;

    assert_eq!(hand_of(&dealt).len(), 13);
    assert_eq!(dealt["deckSize"], 81);
    assert_eq!(dealt["roundNo"], 1);
    assert_eq!(dealt["wildJoker"]["isJoker"], false);
    assert!(dealt["you"]["suggestedGroups"].is_array());
    let owner = dealt["currentTurn"].as_str().ok_or("no turn owner")?;
    assert!(owner == a.session_id || owner == b.session_id);
    let opponent = public_player(&dealt, &b.session_id).ok_or("opponent missing")?;
    assert_eq!(opponent["handSize"], 13);
    assert!(opponent.get("hand").is_none(), "opponents never see cards");

    a.client.close().await?;
    b.client.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn full_room_refuses_and_closes() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;
    let (mut a, mut b, _) = seat_two(&server, "conn-full").await?;

    let mut late = WebSocketClient::connect_retry(&server.room_url("conn-full"), Duration::from_secs(2)).await?;
    let refusal = late.recv_json().await?.ok_or("closed without a reason")?;
    assert_eq!(refusal["type"], "error");
    assert_eq!(refusal["code"], "room_full");
    late.expect_closed().await?;

    a.client.close().await?;
    b.client.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn departed_player_can_resume_their_seat() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;
    let (mut a, mut b, _) = seat_two(&server, "conn-resume").await?;
    let b_id = b.session_id.clone();

    b.client.close().await?;
    let seen = a
        .client
        .recv_until("state", |s| {
            public_player(s, &b_id).is_some_and(|p| p["connected"] == false)
        })
        .await?;
    assert_eq!(seen["phase"], "playing");

    let url = server.resume_url("conn-resume", &b.resume_token);
    let mut back = connect(&url).await?;
    assert_eq!(back.session_id, b_id);
    assert_eq!(back.resume_token, b.resume_token);
    let state = back.client.recv_state_in("playing").await?;
    assert_eq!(hand_of(&state).len(), 13);
    assert_eq!(
        public_player(&state, &b_id).map(|p| p["connected"].clone()),
        Some(serde_json::Value::Bool(true))
    );

    a.client.close().await?;
    back.client.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn public_session_ids_cannot_claim_a_seat() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;
    let (mut a, mut b, dealt) = seat_two(&server, "conn-claim").await?;
    let b_id = b.session_id.clone();
    assert!(public_player(&dealt, &b_id).is_some());

    let mut claimant = WebSocketClient::connect_retry(
        &server.resume_url("conn-claim", &b_id),
        Duration::from_secs(2),
    )
    .await?;
    let refusal = claimant.recv_json().await?.ok_or("closed without a reason")?;
    assert_eq!(refusal["type"], "error");
    assert_eq!(refusal["code"], "not_eligible");
    claimant.expect_closed().await?;

    // The seat still belongs to b and still answers on b's socket.
    let owner_id = dealt["currentTurn"].as_str().ok_or("no turn owner")?.to_string();
    let seated = if owner_id == b_id { &mut b } else { &mut a };
    seated.client.send_json(&serde_json::json!({"type": "draw", "source": "deck"})).await?;
    let drawn = seated
        .client
        .recv_until("state", |s| hand_of(s).len() == 14)
        .await?;
    assert_eq!(
        public_player(&drawn, &b_id).map(|p| p["connected"].clone()),
        Some(serde_json::Value::Bool(true))
    );

    a.client.close().await?;
    b.client.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn last_player_standing_wins_and_room_tears_down() -> Result<(), Box<dyn std::error::Error>> {
    let config = RoomConfig {
        reconnect_grace: Duration::from_millis(150),
        teardown_delay: Duration::from_millis(150),
        ..RoomConfig::default()
    };
    let server = start_test_server(config)?;
    let (mut a, mut b, _) = seat_two(&server, "conn-attrition").await?;

    b.client.close().await?;
    let result = a
        .client
        .recv_until("result", |r| r["isMatchOver"] == true)
        .await?;
    assert_eq!(result["valid"], true);
    assert_eq!(result["grandWinner"], a.session_id.as_str());
    assert_eq!(result["reason"], "All other players left the match.");

    a.client.expect_closed().await?;
    assert_eq!(server.state.rooms.room_count(), 0);

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn malformed_room_ids_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(RoomConfig::default())?;
    let long_id = "x".repeat(65);
    let refused = WebSocketClient::connect_retry(&server.room_url(&long_id), Duration::from_millis(200)).await;
    assert!(refused.is_err());
    assert_eq!(server.state.rooms.room_count(), 0);
    server.stop().await;
    Ok(())
}
