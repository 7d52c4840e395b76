//! The game object and the round loop.
//!
//! A `Game` is created once per round from a `GameBuilder`, mutated
//! every turn, and consumed by `play`, which drives turns across
//! players until a terminal condition holds:
//!
//! - a player's hand is empty while the discard top has no pending
//!   effect — that player wins;
//! - the end was requested — no winner unless a flow rule objects in
//!   the finish phase;
//! - both piles are critically low — fallback victory to the strictly
//!   smallest hand, a tie is a draw.
//!
//! The rule pack is consulted once, at build time, where house packs
//! are merged onto the official rules and conflict-resolved. House
//! packs are merged ahead of the official pack so their decision hooks
//! run first.

pub mod turn;
pub mod view;

pub use view::GameView;

use std::rc::Rc;

use crate::cards::{Card, Color, DeckSupplier, StandardDeck};
use crate::core::error::EngineError;
use crate::core::event::{EventSink, GameEvent, NullSink};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::piles::{DiscardPile, DrawPile};
use crate::players::{Player, Strategy};
use crate::rules::official::official_pack;
use crate::rules::pack::{RulePack, RulePackBuilder};
use crate::rules::rule::{GameResult, Rule};
use crate::rules::clearance;

/// Configures and creates a [`Game`].
pub struct GameBuilder {
    players: Vec<Player>,
    seed: u64,
    hand_size: usize,
    deck: Box<dyn DeckSupplier>,
    house_packs: Vec<Vec<Box<dyn Rule>>>,
    events: Box<dyn EventSink>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            seed: 0,
            hand_size: 7,
            deck: Box::new(StandardDeck),
            house_packs: Vec::new(),
            events: Box::new(NullSink),
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        self.players.push(Player::new(name, strategy));
        self
    }

    /// Seed for the shuffle RNG.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cards dealt to each player (default 7).
    #[must_use]
    pub fn hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Replace the deck supplier (default: the standard 108-card deck).
    #[must_use]
    pub fn deck(mut self, deck: Box<dyn DeckSupplier>) -> Self {
        self.deck = deck;
        self
    }

    /// Merge a named house pack onto the base rules.
    ///
    /// House packs are merged ahead of the official pack; conflicts are
    /// resolved once, in `build`.
    #[must_use]
    pub fn house_pack(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.house_packs.push(rules);
        self
    }

    /// Install an event sink (default: discard everything).
    #[must_use]
    pub fn event_sink(mut self, events: Box<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Resolve the rules and create the game.
    ///
    /// Fails on fewer than two players or on a `Fail` rule conflict.
    pub fn build(self) -> Result<Game, EngineError> {
        if self.players.len() < 2 {
            return Err(EngineError::TooFewPlayers(self.players.len()));
        }

        let mut pack_builder = RulePackBuilder::new();
        for house in self.house_packs {
            pack_builder = pack_builder.with_pack(house);
        }
        pack_builder = pack_builder.with_pack(official_pack());
        let rules = Rc::new(pack_builder.resolve()?);

        let mut rng = GameRng::new(self.seed);
        let expected_size = self.deck.expected_size();
        let draw = DrawPile::shuffled(self.deck.cards(), &mut rng);

        Ok(Game {
            players: PlayerMap::from_vec(self.players),
            current: PlayerId::new(0),
            reversed: false,
            end_requested: false,
            rules,
            draw,
            discard: DiscardPile::new(),
            top_card: None,
            expected_size,
            hand_size: self.hand_size,
            rng,
            events: self.events,
        })
    }
}

/// One round of a shedding-style card game.
pub struct Game {
    players: PlayerMap<Player>,
    current: PlayerId,
    reversed: bool,
    end_requested: bool,
    rules: Rc<RulePack>,
    draw: DrawPile,
    discard: DiscardPile,
    /// Snapshot of the discard top, refreshed at phase boundaries so
    /// card mutations during a turn are visible to victory checks.
    top_card: Option<Card>,
    expected_size: usize,
    hand_size: usize,
    rng: GameRng,
    events: Box<dyn EventSink>,
}

impl Game {
    /// Play the round to completion.
    ///
    /// Deals hands, seeds the discard pile, then runs turns until a
    /// terminal condition holds; the finish phase may still override
    /// the tentative result.
    pub fn play(&mut self) -> Result<GameResult, EngineError> {
        self.deal()?;

        let tentative = loop {
            self.run_turn()?;
            if let Some(result) = self.tentative_result() {
                break result;
            }
            self.advance();
        };

        Ok(self.finish(tentative))
    }

    fn deal(&mut self) -> Result<(), EngineError> {
        let ids: Vec<PlayerId> = self.players.player_ids().collect();
        for id in ids {
            let cards = self.draw.draw(self.hand_size)?;
            for card in cards {
                self.players[id].hand.push(card);
            }
        }

        let initial = self.draw.draw_initial_card()?;
        self.discard.add(initial);
        self.refresh_top();
        Ok(())
    }

    /// Tentative result per the terminal conditions, checked in order.
    fn tentative_result(&self) -> Option<GameResult> {
        let top_open = self.top().is_open();

        // (a) an empty hand wins, unless the top still has a pending
        // effect the next turn must resolve first.
        if !top_open {
            for (id, player) in self.players.iter() {
                if player.hand.is_empty() {
                    return Some(GameResult::Winner(id));
                }
            }
        }

        // (b) requested end: tentatively nobody wins.
        if self.end_requested {
            return Some(GameResult::Draw);
        }

        // (c) both piles critically low: fallback victory to the
        // strictly smallest hand.
        if self.discard.len() <= 1 && self.draw.is_empty() {
            let mut best: Option<(PlayerId, usize)> = None;
            let mut tied = false;
            for (id, player) in self.players.iter() {
                let size = player.hand.len();
                match best {
                    None => best = Some((id, size)),
                    Some((_, smallest)) if size < smallest => {
                        best = Some((id, size));
                        tied = false;
                    }
                    Some((_, smallest)) if size == smallest => tied = true,
                    Some(_) => {}
                }
            }
            return Some(match best {
                Some((id, _)) if !tied => GameResult::Winner(id),
                _ => GameResult::Draw,
            });
        }

        None
    }

    /// Run the finish phase: every flow rule may object to the
    /// tentative result and propose a different winner. Agreeing
    /// objections replace the result; conflicting ones revert it to a
    /// draw.
    fn finish(&mut self, tentative: GameResult) -> GameResult {
        let pack = Rc::clone(&self.rules);
        let mut proposed: Option<PlayerId> = None;
        let mut conflicting = false;

        for rule in pack.flow_rules() {
            if let Some(winner) = rule.on_finish(self, &tentative) {
                match proposed {
                    None => proposed = Some(winner),
                    Some(existing) if existing != winner => conflicting = true,
                    Some(_) => {}
                }
            }
        }

        if conflicting {
            GameResult::Draw
        } else if let Some(winner) = proposed {
            GameResult::Winner(winner)
        } else {
            tentative
        }
    }

    // === Accessors ===

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// A player's display name.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.players[player].name
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.players[player].hand.cards()
    }

    /// Mutable hand access, for rules that move cards directly.
    pub fn hand_mut(&mut self, player: PlayerId) -> &mut crate::players::Hand {
        &mut self.players[player].hand
    }

    /// The cached discard top.
    ///
    /// Panics if the discard pile was never seeded; `play` seeds it
    /// before the first turn.
    #[must_use]
    pub fn top(&self) -> &Card {
        self.top_card
            .as_ref()
            .expect("discard pile has not been seeded")
    }

    /// The discard pile.
    #[must_use]
    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    /// Mutable discard pile access, for rules resolving pending cards.
    pub fn discard_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw.len()
    }

    /// Whether the play direction is reversed.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether an end of game was requested.
    #[must_use]
    pub fn end_requested(&self) -> bool {
        self.end_requested
    }

    /// Request that the game end after the current turn.
    pub fn request_end(&mut self) {
        self.end_requested = true;
    }

    /// Total cards across piles and hands (conservation check).
    #[must_use]
    pub fn card_count(&self) -> usize {
        let in_hands: usize = self.players.iter().map(|(_, p)| p.hand.len()).sum();
        self.draw.len() + self.discard.len() + in_hands
    }

    /// Expected total per the deck supplier.
    #[must_use]
    pub fn expected_card_count(&self) -> usize {
        self.expected_size
    }

    // === Mutation helpers used by flow rules ===

    /// Toggle the play direction.
    pub fn reverse_direction(&mut self) {
        self.reversed = !self.reversed;
        let event = GameEvent::DirectionReversed {
            reversed: self.reversed,
        };
        self.emit(event);
    }

    /// Swap two players' hands wholesale.
    pub fn swap_hands(&mut self, first: PlayerId, second: PlayerId) {
        if first == second {
            return;
        }
        let (a, b) = self.players.get_pair_mut(first, second);
        std::mem::swap(&mut a.hand, &mut b.hand);
        self.emit(GameEvent::HandsSwapped { first, second });
    }

    /// Draw up to `count` cards into a player's hand, recycling the
    /// discard pile when the draw pile runs dry. Returns how many cards
    /// were actually drawn; fewer than `count` means both piles are
    /// exhausted.
    pub fn safe_draw(&mut self, player: PlayerId, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.draw.is_empty() {
                if self.discard.len() <= 1 {
                    break;
                }
                let recycled = self.discard.recycle_below_top();
                let count = recycled.len();
                self.draw.refill(recycled, &mut self.rng);
                self.emit(GameEvent::PileReshuffled { count });
            }
            match self.draw.draw_one() {
                Some(card) => {
                    self.players[player].hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }

        if drawn > 0 {
            self.emit(GameEvent::CardsDrawn {
                player,
                count: drawn,
            });
        }
        drawn
    }

    /// Place the card at `index` of a player's hand onto the discard
    /// pile: records the placer, asks for a color mask on wilds, opens
    /// cards with pending effects, and refreshes the top cache.
    ///
    /// Returns a snapshot of the placed card.
    pub fn place_from_hand(
        &mut self,
        player: PlayerId,
        index: usize,
    ) -> Result<Card, EngineError> {
        let mut card = self.players[player].hand.remove(index);
        card.assign_placer(player)?;

        if card.color() == Color::Wild {
            let color = self.ask_color(player);
            card.assign_mask(color)?;
            self.emit(GameEvent::ColorChosen { player, color });
        }

        if card.kind().opens_on_placement() {
            card.set_open(true)?;
        }

        let snapshot = card.clone();
        self.discard.add(card);
        self.refresh_top();
        self.emit(GameEvent::CardPlaced {
            player,
            card: snapshot.clone(),
        });
        Ok(snapshot)
    }

    /// Whether the card at `index` of a player's hand may be placed on
    /// the current top.
    #[must_use]
    pub fn is_placeable_from_hand(&self, player: PlayerId, index: usize) -> bool {
        let hand = self.players[player].hand.cards();
        match hand.get(index) {
            Some(candidate) => clearance::is_placeable(&self.rules, self.top(), candidate, hand),
            None => false,
        }
    }

    /// Whether a player holds any placeable card.
    #[must_use]
    pub fn has_placeable_card(&self, player: PlayerId) -> bool {
        let hand = self.players[player].hand.cards();
        !clearance::possible_placements(&self.rules, self.top(), hand).is_empty()
    }

    /// Ask a strategy whether to play the card it just drew.
    pub fn ask_should_play_drawn(&mut self, player: PlayerId, index: usize) -> bool {
        let view = self.view_for(player);
        let drawn = match self.players[player].hand.get(index) {
            Some(card) => card.clone(),
            None => return false,
        };
        self.players[player].strategy.should_play_drawn(&view, &drawn)
    }

    /// Ask a strategy for a color until it names a concrete one.
    ///
    /// The wildcard sentinel is reported as an invalid-color event and
    /// the question repeats.
    pub fn ask_color(&mut self, player: PlayerId) -> Color {
        let view = self.view_for(player);
        loop {
            let color = self.players[player].strategy.choose_color(&view);
            if color != Color::Wild {
                return color;
            }
            self.emit(GameEvent::InvalidColor { player });
        }
    }

    /// Report an event to the sink.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.on_event(&event);
    }

    /// Snapshot the game from one player's perspective.
    #[must_use]
    pub fn view_for(&self, player: PlayerId) -> GameView {
        let hand = self.players[player].hand.cards().to_vec();
        let placeable = clearance::possible_placements(&self.rules, self.top(), &hand);
        GameView {
            current: player,
            top: self.top().clone(),
            hand,
            placeable,
            hand_sizes: PlayerMap::new(self.player_count(), |id| self.players[id].hand.len()),
            reversed: self.reversed,
            pending_penalty: self.discard.consecutive_draw(),
            draw_pile_size: self.draw.len(),
            discard_size: self.discard.len(),
        }
    }

    // === Internals shared with the turn machinery ===

    pub(crate) fn rules(&self) -> Rc<RulePack> {
        Rc::clone(&self.rules)
    }

    pub(crate) fn refresh_top(&mut self) {
        self.top_card = self.discard.top().cloned();
    }

    /// The seat after `player` in the current direction.
    #[must_use]
    pub fn next_player(&self, player: PlayerId) -> PlayerId {
        let count = self.player_count();
        let index = player.index();
        let next = if self.reversed {
            (index + count - 1) % count
        } else {
            (index + 1) % count
        };
        PlayerId::new(next as u8)
    }

    fn advance(&mut self) {
        self.current = self.next_player(self.current);
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("current", &self.current)
            .field("reversed", &self.reversed)
            .field("end_requested", &self.end_requested)
            .field("draw", &self.draw.len())
            .field("discard", &self.discard.len())
            .finish_non_exhaustive()
    }
}
