//! Bot Integration Tests
//!
//! Drive the update router in-process with a recording transport. Nothing
//! here talks to Telegram.
//!
//! Run with: cargo test -p integration-tests --test bot_tests

use std::sync::Arc;

use credit_bot::assets::DirectoryRewardSource;
use credit_bot::render;
use credit_bot::handlers::UpdateDispatcher;
use credit_bot::telegram::{OutboundMessage, Update};
use credit_bot::create_bot_state;
use integration_tests::fixtures::*;
use integration_tests::{bot_identity, test_config, RecordingTransport, TestBot};

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_reply_plus_announces_new_rating() {
    let bot = TestBot::in_memory();

    bot.dispatch(reply(&alice(), &bob(), "+")).await.unwrap();

    let sent = bot.transport.take();
    assert_eq!(sent.len(), 1);
    let OutboundMessage::Text(message) = &sent[0] else {
        panic!("expected a text reply");
    };
    assert_eq!(
        message.text,
        "Plus one social credit to Bob. (@bob) Total rating: 1"
    );
    assert_eq!(message.chat_id, CHAT_ID);
    assert_eq!(message.reply_to, None);
}

#[tokio::test]
async fn test_minus_emoji() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(reply(&alice(), &bob(), "👎 no")).await;
    assert_eq!(
        texts,
        vec!["Minus one social credit to Bob. (@bob) Total rating: -1"]
    );
}

#[tokio::test]
async fn test_target_without_handle() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(reply(&alice(), &carol(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Carol. Total rating: 1"]);
}

#[tokio::test]
async fn test_repeat_within_window_is_throttled() {
    let bot = TestBot::in_memory();
    bot.exchange(reply(&alice(), &bob(), "+")).await;

    bot.clock.advance(30);
    bot.dispatch(reply(&alice(), &bob(), "🔥")).await.unwrap();
    let sent = bot.transport.take();
    let OutboundMessage::Text(message) = &sent[0] else {
        panic!("expected a text reply");
    };
    assert_eq!(message.text, render::THROTTLED);
    assert!(message.reply_to.is_some());

    // Other reactors are not affected
    let texts = bot.exchange(reply(&carol(), &bob(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 2"]);

    bot.clock.advance(31);
    let texts = bot.exchange(reply(&alice(), &bob(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 3"]);
}

#[tokio::test]
async fn test_mention_targets_known_user_by_handle() {
    let bot = TestBot::in_memory();
    bot.exchange(reply(&alice(), &bob(), "+")).await;

    let texts = bot.exchange(mention(&carol(), "+ thanks @Bob", "Bob")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 2"]);
}

#[tokio::test]
async fn test_mention_of_unknown_handle_creates_record() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(mention(&alice(), "+ @dave", "dave")).await;
    assert_eq!(texts, vec!["Plus one social credit to dave. (@dave) Total rating: 1"]);
}

#[tokio::test]
async fn test_self_reaction_gets_a_joke() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(reply(&alice(), &alice(), "+")).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("I like you too...Are you Chuck?\n"));

    // No rating was recorded
    let texts = bot.exchange(reply(&bob(), &alice(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Alice. (@alice) Total rating: 1"]);
}

#[tokio::test]
async fn test_self_mention_by_handle_gets_a_joke() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(mention(&alice(), "+ @alice", "alice")).await;
    assert!(texts[0].starts_with("I like you too...Are you Chuck?\n"));
}

#[tokio::test]
async fn test_rating_the_bot_gets_a_joke() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(reply(&alice(), &the_bot(), "+")).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Thank you! I am not *that* type...\nBut I like jokes.\n"));
}

#[tokio::test]
async fn test_mentioning_the_bot_gets_a_joke() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(mention(&alice(), "+ @credit_bot", "credit_bot")).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Thank you! I am not *that* type...\nBut I like jokes.\n"));

    // No handle-only row was created for the bot
    assert_eq!(bot.exchange(command(&admin(), "/dump")).await, vec![render::EMPTY_LEDGER]);
}

#[tokio::test]
async fn test_mention_then_reply_is_throttled() {
    let bot = TestBot::in_memory();
    let texts = bot.exchange(mention(&alice(), "+ @bob", "bob")).await;
    assert_eq!(texts, vec!["Plus one social credit to bob. (@bob) Total rating: 1"]);

    bot.clock.advance(5);
    assert_eq!(
        bot.exchange(reply(&alice(), &bob(), "+")).await,
        vec![render::THROTTLED]
    );

    bot.clock.advance(60);
    let texts = bot.exchange(reply(&alice(), &bob(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 2"]);
}

#[tokio::test]
async fn test_other_bots_and_chatter_are_ignored() {
    let bot = TestBot::in_memory();
    assert!(bot.exchange(reply(&alice(), &other_bot(), "+")).await.is_empty());
    assert!(bot.exchange(mention(&alice(), "+ @helper_bot", "helper_bot")).await.is_empty());
    assert_eq!(bot.exchange(command(&admin(), "/dump")).await, vec![render::EMPTY_LEDGER]);
    assert!(bot.exchange(reply(&alice(), &bob(), "nice one")).await.is_empty());
    assert!(bot.exchange(plain(&alice(), "+")).await.is_empty());
}

// ============================================================================
// Milestones
// ============================================================================

#[tokio::test]
async fn test_milestone_sends_animation() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("party.gif"), b"GIF89a").unwrap();
    let bot = TestBot::in_memory_with(Some(Arc::new(DirectoryRewardSource::new(assets.path()))));

    bot.exchange(command(&admin(), "/set @bob 24")).await;
    bot.dispatch(reply(&alice(), &bob(), "+")).await.unwrap();

    let sent = bot.transport.take();
    assert_eq!(sent.len(), 1);
    let OutboundMessage::Animation(animation) = &sent[0] else {
        panic!("expected an animation");
    };
    assert_eq!(animation.asset.file_name, "party.gif");
    assert_eq!(animation.asset.bytes, b"GIF89a");
    assert_eq!(
        animation.caption,
        "Plus one social credit to Bob. (@bob) Total rating: 25"
    );
}

#[tokio::test]
async fn test_milestone_without_assets_falls_back_to_text() {
    let bot = TestBot::in_memory();
    bot.exchange(command(&admin(), "/set @bob -24")).await;

    let texts = bot.exchange(reply(&alice(), &bob(), "-")).await;
    assert_eq!(
        texts,
        vec!["Minus one social credit to Bob. (@bob) Total rating: -25"]
    );
}

// ============================================================================
// Commands
// ============================================================================

fn command(from: &Member, text: &str) -> Update {
    plain(from, text)
}

#[tokio::test]
async fn test_start_greets_with_mention() {
    let bot = TestBot::in_memory();
    bot.dispatch(command(&alice(), "/start")).await.unwrap();

    let sent = bot.transport.take();
    let OutboundMessage::Text(message) = &sent[0] else {
        panic!("expected a text reply");
    };
    assert_eq!(message.text, "Hi [Alice](tg://user?id=100)\\!");
    assert!(message.markdown_v2);
    assert!(message.force_reply);
}

#[tokio::test]
async fn test_help_addressed_to_this_bot_only() {
    let bot = TestBot::in_memory();
    assert_eq!(bot.exchange(command(&alice(), "/help")).await, vec![render::HELP]);
    assert_eq!(
        bot.exchange(command(&alice(), "/help@credit_bot")).await,
        vec![render::HELP]
    );
    assert!(bot.exchange(command(&alice(), "/help@other_bot")).await.is_empty());
}

#[tokio::test]
async fn test_admin_commands_refuse_non_admins() {
    let bot = TestBot::in_memory();
    bot.exchange(reply(&alice(), &bob(), "+")).await;

    assert_eq!(bot.exchange(command(&alice(), "/dump")).await, vec![render::ADMIN_ONLY]);
    assert_eq!(
        bot.exchange(command(&alice(), "/set @bob 100")).await,
        vec![render::ADMIN_ONLY]
    );

    bot.clock.advance(61);
    let texts = bot.exchange(reply(&alice(), &bob(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 2"]);
}

#[tokio::test]
async fn test_dump_lists_ledger() {
    let bot = TestBot::in_memory();
    assert_eq!(bot.exchange(command(&admin(), "/dump")).await, vec![render::EMPTY_LEDGER]);

    bot.exchange(reply(&alice(), &bob(), "+")).await;
    bot.exchange(reply(&alice(), &carol(), "-")).await;

    let texts = bot.exchange(command(&admin(), "/dump")).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Bob @bob [200]: 1"));
    assert!(texts[0].contains("Carol [300]: -1"));
}

#[tokio::test]
async fn test_set_overrides_rating() {
    let bot = TestBot::in_memory();
    bot.exchange(reply(&alice(), &bob(), "+")).await;

    let texts = bot.exchange(command(&admin(), "/set @bob 42")).await;
    assert_eq!(texts, vec!["Rating of Bob set to 42."]);

    let texts = bot.exchange(command(&admin(), "/set 300 -3")).await;
    assert_eq!(texts, vec!["Rating of 300 set to -3."]);

    // Admin overrides bypass the window
    let texts = bot.exchange(reply(&carol(), &bob(), "+")).await;
    assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 43"]);
}

#[tokio::test]
async fn test_set_usage_errors() {
    let bot = TestBot::in_memory();
    for text in ["/set", "/set @bob", "/set @bob many", "/set @bob 1 2"] {
        assert_eq!(
            bot.exchange(command(&admin(), text)).await,
            vec![render::SET_USAGE],
            "{text}"
        );
    }
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_ratings_and_window_survive_restart() {
    let data = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), &[]);

    {
        let bot = TestBot::from_config(&config);
        let texts = bot.exchange(reply(&alice(), &bob(), "+")).await;
        assert_eq!(texts, vec!["Plus one social credit to Bob. (@bob) Total rating: 1"]);
    }

    let bot = TestBot::from_config(&config);
    assert_eq!(
        bot.exchange(reply(&alice(), &bob(), "+")).await,
        vec![render::THROTTLED]
    );
    assert_eq!(
        bot.exchange(reply(&carol(), &bob(), "+")).await,
        vec!["Plus one social credit to Bob. (@bob) Total rating: 2"]
    );

    assert!(data.path().join("ledger.json").exists());
}

#[tokio::test]
async fn test_configured_bot_protects_its_username() {
    let data = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), &[]);
    let bot = TestBot::from_config(&config);

    let texts = bot.exchange(mention(&alice(), "+ @Credit_Bot", "Credit_Bot")).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Thank you! I am not *that* type..."));
    assert!(!data.path().join("ledger.json").exists());
}

#[tokio::test]
async fn test_dump_pages_follow_config() {
    let data = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), &[("DUMP_PAGE_SIZE", "2")]);
    let bot = TestBot::from_config(&config);

    for target in [bob(), carol(), admin()] {
        bot.exchange(reply(&alice(), &target, "+")).await;
    }

    let texts = bot.exchange(command(&admin(), "/dump")).await;
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("1. Bob"));
    assert!(texts[1].starts_with("3. Root"));
}

#[tokio::test]
async fn test_failed_delivery_is_a_fault() {
    let data = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), &[]);
    let transport = Arc::new(RecordingTransport::failing());
    let state = create_bot_state(&config, transport, bot_identity()).unwrap();

    let err = UpdateDispatcher::dispatch(&state, reply(&alice(), &bob(), "+"))
        .await
        .unwrap_err();
    assert!(err.is_fault());
}
