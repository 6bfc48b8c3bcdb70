use desperados_core::{
    catalog, Card, CardName, CharacterId, Deck, EventBus, EventId, Game, GameConfig, GameError,
    Phase, PlayerId, Rank, Response, Role, Suit, Table, Winner,
};

/// Seat `n` players and force a known layout: everyone a Medic (no passive
/// combat quirks), seat order equal to join order, the first seat holding
/// the marshal badge and the turn.
fn fixture(n: usize) -> (Game, Vec<PlayerId>, EventBus) {
    let mut events = EventBus::default();
    let mut game = Game::new(GameConfig {
        seed: Some(11),
        events_enabled: false,
        ..GameConfig::default()
    });
    let mut ids = Vec::new();
    for i in 0..n {
        let public = game.join(&format!("p{i}"), &mut events).unwrap();
        ids.push(game.resolve_public(public).unwrap());
    }
    game.deck = catalog::build_deck(&mut game.rng);
    let roles = [Role::Marshal, Role::Outlaw, Role::Outlaw, Role::Renegade, Role::Deputy, Role::Outlaw, Role::Deputy];
    for (i, p) in game.players.iter_mut().enumerate() {
        p.role = roles[i];
        p.character = CharacterId::Medic;
        p.max_hp = 4;
        p.hp = 4;
        p.alive = true;
    }
    game.table = Table::new(ids.clone());
    game.phase = Phase::Playing;
    events.take();
    (game, ids, events)
}

fn card(id: u32, name: CardName) -> Card {
    Card::new(id, name, Suit::Clubs, Rank::Seven)
}

fn give(game: &mut Game, player: PlayerId, cards: &[Card]) {
    game.player_mut(player).unwrap().hand = cards.to_vec();
}

#[test]
fn attack_passed_costs_one_hit_point() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    assert!(game.pending.is_some());

    game.respond(t, Response::Pass, &mut events).unwrap();
    assert!(game.pending.is_none());
    assert_eq!(game.player(t).unwrap().hp, 3);
    assert_eq!(game.current_player(), Some(m));
}

#[test]
fn attack_answered_by_dodge_leaves_target_unharmed() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[card(901, CardName::Dodge)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::PlayCard { index: 0 }, &mut events)
        .unwrap();
    assert!(game.pending.is_none());
    assert_eq!(game.player(t).unwrap().hp, 4);
    assert!(game.player(t).unwrap().hand.is_empty());
}

#[test]
fn second_attack_in_a_turn_is_rejected() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(
        &mut game,
        m,
        &[card(900, CardName::Attack), card(901, CardName::Attack)],
    );

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    let err = game.play(m, 0, Some(t), &mut events).unwrap_err();
    assert_eq!(err, GameError::AttackLimit);
}

#[test]
fn attack_beyond_weapon_range_is_rejected() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, far) = (ids[0], ids[2]);
    give(&mut game, m, &[card(900, CardName::Attack)]);

    let err = game.play(m, 0, Some(far), &mut events).unwrap_err();
    assert_eq!(err, GameError::OutOfRange);
    assert_eq!(game.player(m).unwrap().hand.len(), 1);
}

#[test]
fn mustang_pushes_target_out_of_reach_and_scope_pulls_back() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    game.player_mut(t).unwrap().in_play = vec![card(910, CardName::Mustang)];

    let err = game.play(m, 0, Some(t), &mut events).unwrap_err();
    assert_eq!(err, GameError::OutOfRange);

    game.player_mut(m).unwrap().in_play = vec![card(911, CardName::Scope)];
    game.play(m, 0, Some(t), &mut events).unwrap();
    assert!(game.pending.is_some());
}

#[test]
fn lethal_damage_is_absorbed_by_a_tonic_in_hand() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[card(901, CardName::Tonic)]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();

    let target = game.player(t).unwrap();
    assert!(target.alive);
    assert_eq!(target.hp, 1);
    assert!(target.hand.is_empty());
}

#[test]
fn no_tonic_rescue_when_only_two_remain() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.table = Table::new(vec![m, t]);
    game.player_mut(ids[2]).unwrap().alive = false;
    game.player_mut(ids[3]).unwrap().alive = false;
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[card(901, CardName::Tonic)]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();

    assert!(!game.player(t).unwrap().alive);
    assert_eq!(game.phase, Phase::Finished);
    assert_eq!(game.winner, Some(Winner::Lawful));
}

#[test]
fn outlaw_bounty_pays_three_cards() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();

    assert!(!game.player(t).unwrap().alive);
    assert_eq!(game.player(m).unwrap().hand.len(), 3);
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn commands_freeze_after_game_over() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.table = Table::new(vec![m, t]);
    game.player_mut(ids[2]).unwrap().alive = false;
    game.player_mut(ids[3]).unwrap().alive = false;
    give(&mut game, m, &[card(900, CardName::Attack)]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    assert_eq!(game.phase, Phase::Finished);

    give(&mut game, m, &[card(902, CardName::Tonic)]);
    assert_eq!(
        game.play(m, 0, None, &mut events).unwrap_err(),
        GameError::GameOver
    );
    game.reset(&mut events).unwrap();
    assert_eq!(game.phase, Phase::Lobby);
    assert!(game.players.is_empty());
}

#[test]
fn duel_alternates_until_one_side_passes() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Duel)]);
    give(&mut game, t, &[card(901, CardName::Attack)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    assert_eq!(game.pending.as_ref().unwrap().awaiting(), Some(t));

    game.respond(t, Response::PlayCard { index: 0 }, &mut events)
        .unwrap();
    assert_eq!(game.pending.as_ref().unwrap().awaiting(), Some(m));

    game.respond(m, Response::Pass, &mut events).unwrap();
    assert!(game.pending.is_none());
    assert_eq!(game.player(m).unwrap().hp, 3);
}

#[test]
fn only_the_queue_head_may_answer() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    assert_eq!(
        game.respond(ids[2], Response::Pass, &mut events).unwrap_err(),
        GameError::NotYourInterrupt
    );
    assert_eq!(
        game.play(m, 0, Some(t), &mut events).unwrap_err(),
        GameError::InterruptOutstanding
    );
}

#[test]
fn general_store_serves_everyone_once_in_turn_order() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    give(&mut game, m, &[card(900, CardName::GeneralStore)]);
    for &id in &ids[1..] {
        give(&mut game, id, &[]);
    }

    game.play(m, 0, None, &mut events).unwrap();
    assert_eq!(game.pending.as_ref().unwrap().revealed.len(), 4);

    for &id in &ids {
        assert_eq!(game.pending.as_ref().unwrap().awaiting(), Some(id));
        game.respond(id, Response::PickCard { index: 0 }, &mut events)
            .unwrap();
    }
    assert!(game.pending.is_none());
    for &id in &ids[1..] {
        assert_eq!(game.player(id).unwrap().hand.len(), 1);
    }
}

#[test]
fn hand_limit_demands_exact_discards_then_turn_advances() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    let hand: Vec<Card> = (0..6).map(|i| card(900 + i, CardName::Dodge)).collect();
    give(&mut game, m, &hand);
    game.player_mut(m).unwrap().hp = 3;

    game.end_turn(m, &mut events).unwrap();
    assert!(game.pending.is_some());
    for _ in 0..3 {
        game.respond(m, Response::PlayCard { index: 0 }, &mut events)
            .unwrap();
    }
    assert!(game.pending.is_none());
    assert_eq!(game.player(m).unwrap().hand.len(), 3);
    assert_eq!(game.current_player(), Some(ids[1]));
}

#[test]
fn no_hand_limit_trait_ends_the_turn_directly() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    game.player_mut(m).unwrap().character = CharacterId::Packrat;
    let hand: Vec<Card> = (0..6).map(|i| card(900 + i, CardName::Dodge)).collect();
    give(&mut game, m, &hand);
    game.player_mut(m).unwrap().hp = 3;

    game.end_turn(m, &mut events).unwrap();
    assert!(game.pending.is_none());
    assert_eq!(game.player(m).unwrap().hand.len(), 6);
    assert_eq!(game.current_player(), Some(ids[1]));
}

#[test]
fn gatling_skips_targets_saved_by_a_barrel() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    give(&mut game, m, &[card(900, CardName::Gatling)]);
    game.player_mut(ids[1]).unwrap().in_play = vec![card(910, CardName::Barrel)];
    // Checks always pass under this event, so the barrel save is certain.
    game.active_event_id = Some(EventId::FullMoon);

    game.play(m, 0, None, &mut events).unwrap();
    let pending = game.pending.as_ref().unwrap();
    assert_eq!(pending.queue.len(), 2);
    assert_eq!(pending.awaiting(), Some(ids[2]));
}

#[test]
fn snatch_steals_a_hand_card_at_reach_one() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Snatch)]);
    give(&mut game, t, &[card(901, CardName::Dodge)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(m, Response::FromHand, &mut events).unwrap();

    assert!(game.pending.is_none());
    assert_eq!(game.player(m).unwrap().hand.len(), 1);
    assert!(game.player(t).unwrap().hand.is_empty());
}

#[test]
fn sabotage_discards_a_chosen_table_card() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Sabotage)]);
    game.player_mut(t).unwrap().in_play = vec![card(910, CardName::Barrel)];

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(m, Response::FromTable { index: 0 }, &mut events)
        .unwrap();

    assert!(game.player(t).unwrap().in_play.is_empty());
    assert_eq!(game.deck.top_discard().map(|c| c.id), Some(910));
}

#[test]
fn deferred_cost_fires_its_attack_after_payment() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, far) = (ids[0], ids[2]);
    give(
        &mut game,
        m,
        &[card(900, CardName::Springfield), card(901, CardName::Dodge)],
    );

    game.play(m, 0, Some(far), &mut events).unwrap();
    assert_eq!(game.pending.as_ref().unwrap().awaiting(), Some(m));

    game.respond(m, Response::PlayCard { index: 0 }, &mut events)
        .unwrap();
    // The cost step resolved and the captured attack opened immediately.
    assert_eq!(game.pending.as_ref().unwrap().awaiting(), Some(far));
    game.respond(far, Response::Pass, &mut events).unwrap();
    assert_eq!(game.player(far).unwrap().hp, 3);
}

#[test]
fn springfield_without_a_second_card_is_rejected() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, far) = (ids[0], ids[2]);
    give(&mut game, m, &[card(900, CardName::Springfield)]);
    assert_eq!(
        game.play(m, 0, Some(far), &mut events).unwrap_err(),
        GameError::CostUnmet
    );
}

#[test]
fn suit_immunity_consumes_the_play_without_effect() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.player_mut(t).unwrap().character = CharacterId::Snakeblood;
    give(
        &mut game,
        m,
        &[Card::new(900, CardName::Attack, Suit::Diamonds, Rank::Ace)],
    );

    game.play(m, 0, Some(t), &mut events).unwrap();
    assert!(game.pending.is_none());
    assert!(game.player(m).unwrap().hand.is_empty());
    assert_eq!(game.player(t).unwrap().hp, 4);
}

#[test]
fn trickshot_plays_a_dodge_as_an_attack() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.player_mut(m).unwrap().character = CharacterId::Trickshot;
    give(&mut game, m, &[card(900, CardName::Dodge)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    assert!(game.pending.is_some());
    game.respond(t, Response::Pass, &mut events).unwrap();
    assert_eq!(game.player(t).unwrap().hp, 3);
}

#[test]
fn opportunist_draws_after_dodging_outside_their_turn() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.player_mut(t).unwrap().character = CharacterId::Opportunist;
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[card(901, CardName::Dodge)]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::PlayCard { index: 0 }, &mut events)
        .unwrap();
    assert_eq!(game.player(t).unwrap().hand.len(), 1);
}

#[test]
fn reactive_table_card_answers_an_attack_but_not_when_fresh() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack), card(901, CardName::Attack)]);
    let plate = card(910, CardName::IronPlate);
    game.player_mut(t).unwrap().equip(plate);
    // Freshly equipped: unusable until the owner's next turn.
    game.play(m, 0, Some(t), &mut events).unwrap();
    assert_eq!(
        game.respond(t, Response::UseInPlay { index: 0 }, &mut events)
            .unwrap_err(),
        GameError::CardNotReady
    );
    game.player_mut(t).unwrap().fresh.clear();
    game.respond(t, Response::UseInPlay { index: 0 }, &mut events)
        .unwrap();
    assert!(game.pending.is_none());
    assert_eq!(game.player(t).unwrap().hp, 4);
    assert!(game.player(t).unwrap().in_play.is_empty());
}

#[test]
fn eliminated_players_cards_go_to_a_living_scavenger() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.player_mut(ids[2]).unwrap().character = CharacterId::Gravedigger;
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[card(901, CardName::Dodge)]);
    game.player_mut(t).unwrap().hp = 1;
    give(&mut game, ids[2], &[]);

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();

    assert!(!game.player(t).unwrap().alive);
    assert_eq!(game.player(ids[2]).unwrap().hand.len(), 1);
}

#[test]
fn marshal_forfeits_everything_for_shooting_a_deputy() {
    let (mut game, ids, mut events) = fixture(5);
    let m = ids[0];
    let deputy = ids[4];
    give(&mut game, m, &[card(900, CardName::Attack), card(901, CardName::Dodge)]);
    game.player_mut(m).unwrap().in_play = vec![card(910, CardName::Winchester)];
    give(&mut game, deputy, &[]);
    game.player_mut(deputy).unwrap().hp = 1;

    game.play(m, 0, Some(deputy), &mut events).unwrap();
    game.respond(deputy, Response::Pass, &mut events).unwrap();

    assert!(!game.player(deputy).unwrap().alive);
    let marshal = game.player(m).unwrap();
    assert!(marshal.hand.is_empty());
    assert!(marshal.in_play.is_empty());
}

#[test]
fn renegade_wins_only_as_the_last_one_standing() {
    let (mut game, ids, mut events) = fixture(4);
    let renegade = ids[3];
    game.table = Table::new(vec![ids[0], renegade]);
    game.player_mut(ids[1]).unwrap().alive = false;
    game.player_mut(ids[2]).unwrap().alive = false;
    give(&mut game, renegade, &[]);
    give(&mut game, ids[0], &[]);
    game.player_mut(ids[0]).unwrap().hp = 1;

    // Renegade guns down the marshal one-on-one.
    game.table.current = game.table.position(renegade).unwrap();
    game.player_mut(renegade).unwrap().hand = vec![card(900, CardName::Attack)];
    game.play(renegade, 0, Some(ids[0]), &mut events).unwrap();
    game.respond(ids[0], Response::Pass, &mut events).unwrap();

    assert_eq!(game.winner, Some(Winner::Renegade));
}

#[test]
fn marshal_death_with_survivors_hands_the_game_to_outlaws() {
    let (mut game, ids, mut events) = fixture(4);
    let outlaw = ids[1];
    game.table.current = game.table.position(outlaw).unwrap();
    game.player_mut(outlaw).unwrap().hand = vec![card(900, CardName::Attack)];
    give(&mut game, ids[0], &[]);
    game.player_mut(ids[0]).unwrap().hp = 1;

    game.play(outlaw, 0, Some(ids[0]), &mut events).unwrap();
    game.respond(ids[0], Response::Pass, &mut events).unwrap();

    assert_eq!(game.winner, Some(Winner::Outlaws));
}

#[test]
fn jailbreak_fails_on_empty_piles_and_skips_the_turn() {
    let (mut game, ids, mut events) = fixture(4);
    let t = ids[1];
    game.player_mut(t).unwrap().in_play = vec![card(910, CardName::Jail)];
    game.deck = Deck::default();
    give(&mut game, ids[0], &[]);

    game.end_turn(ids[0], &mut events).unwrap();
    // The check cannot succeed with both piles empty, so the seat after the
    // jailed player holds the turn now.
    assert_eq!(game.current_player(), Some(ids[2]));
    assert!(game.player(t).unwrap().in_play.is_empty());
}

#[test]
fn dynamite_explodes_for_three_when_the_check_cannot_pass() {
    let (mut game, ids, mut events) = fixture(4);
    let t = ids[1];
    game.player_mut(t).unwrap().in_play = vec![card(910, CardName::Dynamite)];
    game.deck = Deck::default();
    give(&mut game, ids[0], &[]);

    game.end_turn(ids[0], &mut events).unwrap();
    let hit = game.player(t).unwrap();
    assert_eq!(hit.hp, 1);
    assert!(hit.in_play.is_empty());
    assert_eq!(game.current_player(), Some(t));
}

#[test]
fn medic_discards_two_to_heal_one() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    give(&mut game, m, &[card(900, CardName::Dodge), card(901, CardName::Dodge)]);
    game.player_mut(m).unwrap().hp = 2;

    game.activate_ability(m, &[0, 1], None, &mut events).unwrap();
    let healed = game.player(m).unwrap();
    assert_eq!(healed.hp, 3);
    assert!(healed.hand.is_empty());
}

#[test]
fn view_hides_other_hands_and_living_roles() {
    let (game, ids, _events) = fixture(4);
    let view = game.view_for(Some(ids[1]));

    let me = view.players.iter().find(|p| p.role == Some(Role::Outlaw));
    assert!(me.is_some());
    let marshal = &view.players[0];
    assert_eq!(marshal.role, Some(Role::Marshal));
    assert!(marshal.hand.is_none());
    let renegade = &view.players[3];
    assert_eq!(renegade.role, None);
}

#[test]
fn started_game_deals_hands_and_opens_the_marshals_turn() {
    let mut events = EventBus::default();
    let mut game = Game::new(GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    });
    for i in 0..4 {
        game.join(&format!("p{i}"), &mut events).unwrap();
    }
    game.start(&mut events).unwrap();

    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.table.alive_count(), 4);
    let marshal = game.marshal().unwrap();
    // The marshal's seat opened first; with events enabled one rule module
    // is already showing.
    assert!(game.active_event_id.is_some());
    assert_eq!(game.current_player(), Some(marshal));
    assert!(game.players.iter().all(|p| !p.hand.is_empty()));
}

#[test]
fn oversized_table_deals_extra_seats_as_outlaws() {
    let mut events = EventBus::default();
    let mut game = Game::new(GameConfig {
        seed: Some(9),
        max_players: 8,
        events_enabled: false,
        ..GameConfig::default()
    });
    for i in 0..8 {
        game.join(&format!("p{i}"), &mut events).unwrap();
    }
    game.start(&mut events).unwrap();

    assert_eq!(game.phase, Phase::Playing);
    let marshals = game
        .players
        .iter()
        .filter(|p| p.role == Role::Marshal)
        .count();
    assert_eq!(marshals, 1);
    let outlaws = game
        .players
        .iter()
        .filter(|p| p.role == Role::Outlaw)
        .count();
    assert_eq!(outlaws, 4);
}

#[test]
fn leave_is_frozen_after_game_over() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.table = Table::new(vec![m, t]);
    game.player_mut(ids[2]).unwrap().alive = false;
    game.player_mut(ids[3]).unwrap().alive = false;
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    assert_eq!(game.phase, Phase::Finished);

    give(&mut game, m, &[card(901, CardName::Dodge)]);
    assert_eq!(game.leave(m, &mut events).unwrap_err(), GameError::GameOver);
    let survivor = game.player(m).unwrap();
    assert!(survivor.alive);
    assert_eq!(survivor.hand.len(), 1);
}

#[test]
fn dead_man_event_revives_the_first_eliminated_as_a_ghost() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    assert!(!game.player(t).unwrap().alive);

    // The event comes up when the table wraps back to the marshal.
    game.event_deck = vec![EventId::DeadMan];
    game.end_turn(m, &mut events).unwrap();
    game.end_turn(ids[2], &mut events).unwrap();
    game.end_turn(ids[3], &mut events).unwrap();

    let revived = game.player(t).unwrap();
    assert!(revived.alive);
    assert!(revived.ghost);
    assert_eq!(revived.hp, 2);
    assert_eq!(revived.hand.len(), 2);
}

#[test]
fn thunderstorm_event_wipes_every_card_in_play() {
    let (mut game, ids, mut events) = fixture(4);
    game.event_deck = vec![EventId::Thunderstorm];
    game.player_mut(ids[1]).unwrap().in_play = vec![card(910, CardName::Barrel)];
    game.player_mut(ids[2]).unwrap().in_play = vec![card(911, CardName::Mustang)];
    game.table.current = game.table.position(ids[3]).unwrap();
    give(&mut game, ids[3], &[]);

    game.end_turn(ids[3], &mut events).unwrap();

    assert_eq!(game.active_event_id, Some(EventId::Thunderstorm));
    assert!(game.player(ids[1]).unwrap().in_play.is_empty());
    assert!(game.player(ids[2]).unwrap().in_play.is_empty());
}

#[test]
fn heatwave_burns_the_acting_player_at_end_of_turn() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    game.active_event_id = Some(EventId::Heatwave);
    give(&mut game, m, &[]);

    game.end_turn(m, &mut events).unwrap();
    assert_eq!(game.player(m).unwrap().hp, 3);
    assert_eq!(game.current_player(), Some(ids[1]));
}

#[test]
fn vendetta_event_raises_the_kill_bounty() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    game.active_event_id = Some(EventId::Vendetta);
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, t, &[]);
    game.player_mut(t).unwrap().hp = 1;

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    assert_eq!(game.player(m).unwrap().hand.len(), 5);
}

#[test]
fn renegade_kill_pays_the_bounty_too() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    let renegade = ids[3];
    give(&mut game, m, &[card(900, CardName::Attack)]);
    give(&mut game, renegade, &[]);
    game.player_mut(renegade).unwrap().hp = 1;

    game.play(m, 0, Some(renegade), &mut events).unwrap();
    game.respond(renegade, Response::Pass, &mut events).unwrap();

    assert!(!game.player(renegade).unwrap().alive);
    assert_eq!(game.player(m).unwrap().hand.len(), 3);
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn trait_suppressing_event_restores_the_attack_limit() {
    let (mut game, ids, mut events) = fixture(4);
    let (m, t) = (ids[0], ids[1]);
    give(
        &mut game,
        m,
        &[
            card(900, CardName::Attack),
            card(901, CardName::Attack),
            card(902, CardName::Attack),
        ],
    );
    game.player_mut(m).unwrap().in_play = vec![card(910, CardName::Volcanic)];

    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();
    // The rapid-fire weapon normally lifts the one-attack limit.
    game.play(m, 0, Some(t), &mut events).unwrap();
    game.respond(t, Response::Pass, &mut events).unwrap();

    game.active_event_id = Some(EventId::Hangover);
    assert_eq!(
        game.play(m, 0, Some(t), &mut events).unwrap_err(),
        GameError::AttackLimit
    );
}

#[test]
fn store_leftovers_hit_the_discard_when_a_responder_drops() {
    let (mut game, ids, mut events) = fixture(4);
    let m = ids[0];
    give(&mut game, m, &[card(900, CardName::GeneralStore)]);
    for &id in &ids[1..] {
        give(&mut game, id, &[]);
    }

    game.play(m, 0, None, &mut events).unwrap();
    assert_eq!(game.pending.as_ref().unwrap().revealed.len(), 4);

    game.respond(m, Response::PickCard { index: 0 }, &mut events)
        .unwrap();
    game.respond(ids[1], Response::PickCard { index: 0 }, &mut events)
        .unwrap();
    game.leave(ids[2], &mut events).unwrap();
    let before = game.deck.discard.len();
    game.respond(ids[3], Response::PickCard { index: 0 }, &mut events)
        .unwrap();

    // The departed seat's pick never happens; its card goes to the discard.
    assert!(game.pending.is_none());
    assert_eq!(game.deck.discard.len(), before + 1);
}

#[test]
fn start_rejects_a_short_table() {
    let mut events = EventBus::default();
    let mut game = Game::new(GameConfig::default());
    game.join("solo", &mut events).unwrap();
    assert!(matches!(
        game.start(&mut events),
        Err(GameError::PlayerCount(4, 7))
    ));
}
