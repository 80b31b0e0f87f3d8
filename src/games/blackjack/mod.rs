//! Simplified blackjack as a stochastic game.
//!
//! The player sees their own total and the dealer's up card, then hits or
//! sticks. Once the player sticks, the dealer plays a fixed policy: hit below
//! 17 or while behind the player, otherwise stick. Cards are drawn from an
//! infinite deck, so every draw has the same distribution:
//!
//! | Card        | Points | Probability |
//! |-------------|--------|-------------|
//! | 10, J, Q, K | 10     | 16/52       |
//! | Ace         | 11     | 4/52        |
//! | 2..=9       | face   | 4/52 each   |
//!
//! An ace counts 11 while it keeps the hand at or below 21 and drops to 1
//! when the hand would otherwise bust.
//!
//! Rewards are paid on entering the final state: -1 when the player busts,
//! +1 when the dealer busts, and the sign of the difference when the dealer
//! sticks.

pub mod report;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dp::game::{Game, Outcomes, StochasticGame};

pub use report::{BlackjackReport, PolicyTable};

/// Points per card rank, ten-valued cards first.
pub const CARD_POINTS: [u8; 10] = [10, 11, 2, 3, 4, 5, 6, 7, 8, 9];

/// Draw probability per entry of [`CARD_POINTS`].
pub const CARD_PROBABILITIES: [f64; 10] = [
    16.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
    4.0 / 52.0,
];

/// Highest total that does not bust.
pub const BLACKJACK: u8 = 21;

/// Dealer hits below this total.
pub const DEALER_STANDS_ON: u8 = 17;

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// The player decides.
    Player,
    /// The dealer plays out their fixed policy.
    Dealer,
    /// The hand is settled.
    Over,
}

/// A blackjack position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlackjackState {
    /// Whose turn it is.
    pub turn: Turn,
    /// Player total, aces counted as 11 while usable.
    pub player_sum: u8,
    /// Player aces still counted as 11.
    pub player_aces: u8,
    /// Dealer total, aces counted as 11 while usable.
    pub dealer_sum: u8,
    /// Dealer aces still counted as 11.
    pub dealer_aces: u8,
}

impl fmt::Display for BlackjackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} player:{}{} dealer:{}{}",
            self.turn,
            self.player_sum,
            if self.player_aces > 0 { " (soft)" } else { "" },
            self.dealer_sum,
            if self.dealer_aces > 0 { " (soft)" } else { "" }
        )
    }
}

/// Blackjack moves. The dealer's moves are forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlackjackAction {
    /// Player draws a card.
    Hit,
    /// Player ends their turn.
    Stick,
    /// Dealer draws a card.
    DealerHit,
    /// Dealer ends the hand.
    DealerStick,
}

crate::impl_action!(BlackjackAction);

/// Initial position: the player's hand and the dealer's up card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlackjackParams {
    /// Whether the player holds an ace counted as 11.
    pub usable_ace: bool,
    /// Player total.
    pub player_sum: u8,
    /// Dealer up card, 1 for an ace.
    pub dealer_card: u8,
}

impl BlackjackParams {
    /// Create parameters for one initial position.
    pub fn new(usable_ace: bool, player_sum: u8, dealer_card: u8) -> Self {
        Self {
            usable_ace,
            player_sum,
            dealer_card,
        }
    }
}

/// Add a card to a hand, demoting one ace if the hand would bust.
///
/// Totals saturate, so out-of-range hands simply bust.
fn draw(sum: u8, aces: u8, points: u8) -> (u8, u8) {
    let mut sum = sum.saturating_add(points);
    let mut aces = aces.saturating_add(u8::from(points == 11));
    if sum > BLACKJACK && aces > 0 {
        sum -= 10;
        aces -= 1;
    }
    (sum, aces)
}

/// Blackjack against a fixed dealer policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackjackGame;

impl BlackjackGame {
    /// Create the game.
    pub fn new() -> Self {
        Self
    }

    fn dealer_must_hit(state: &BlackjackState) -> bool {
        state.dealer_sum < DEALER_STANDS_ON || state.dealer_sum < state.player_sum
    }
}

impl Game for BlackjackGame {
    type State = BlackjackState;
    type Action = BlackjackAction;
    type Key = BlackjackState;
    type Params = BlackjackParams;

    fn reset(&self, params: BlackjackParams) -> BlackjackState {
        let dealer_ace = params.dealer_card == 1;
        BlackjackState {
            turn: Turn::Player,
            player_sum: params.player_sum,
            player_aces: u8::from(params.usable_ace),
            dealer_sum: if dealer_ace { 11 } else { params.dealer_card },
            dealer_aces: u8::from(dealer_ace),
        }
    }

    fn state_key(&self, state: &BlackjackState) -> BlackjackState {
        *state
    }

    fn action_domain(&self, state: &BlackjackState) -> Vec<BlackjackAction> {
        match state.turn {
            Turn::Player => vec![BlackjackAction::Hit, BlackjackAction::Stick],
            Turn::Dealer if Self::dealer_must_hit(state) => vec![BlackjackAction::DealerHit],
            Turn::Dealer => vec![BlackjackAction::DealerStick],
            Turn::Over => Vec::new(),
        }
    }

    fn action_name(&self, action: &BlackjackAction) -> String {
        match action {
            BlackjackAction::Hit => "hit".to_string(),
            BlackjackAction::Stick => "stick".to_string(),
            BlackjackAction::DealerHit => "dealer hit".to_string(),
            BlackjackAction::DealerStick => "dealer stick".to_string(),
        }
    }

    fn state_description(&self, state: &BlackjackState) -> String {
        format!("{}", state)
    }
}

impl StochasticGame for BlackjackGame {
    fn step(&self, state: &BlackjackState, action: &BlackjackAction) -> Outcomes<BlackjackState> {
        match action {
            BlackjackAction::Hit => {
                let mut outcomes = Outcomes::with_capacity(CARD_POINTS.len());
                for (&points, &probability) in CARD_POINTS.iter().zip(&CARD_PROBABILITIES) {
                    let (player_sum, player_aces) = draw(state.player_sum, state.player_aces, points);
                    let mut next = BlackjackState {
                        player_sum,
                        player_aces,
                        ..*state
                    };
                    if player_sum > BLACKJACK {
                        next.turn = Turn::Over;
                        outcomes.push(next, probability, -1.0);
                    } else {
                        outcomes.push(next, probability, 0.0);
                    }
                }
                outcomes
            }
            BlackjackAction::Stick => Outcomes::certain(
                BlackjackState {
                    turn: Turn::Dealer,
                    ..*state
                },
                0.0,
            ),
            BlackjackAction::DealerHit => {
                let mut outcomes = Outcomes::with_capacity(CARD_POINTS.len());
                for (&points, &probability) in CARD_POINTS.iter().zip(&CARD_PROBABILITIES) {
                    let (dealer_sum, dealer_aces) = draw(state.dealer_sum, state.dealer_aces, points);
                    let mut next = BlackjackState {
                        dealer_sum,
                        dealer_aces,
                        ..*state
                    };
                    if dealer_sum > BLACKJACK {
                        next.turn = Turn::Over;
                        outcomes.push(next, probability, 1.0);
                    } else {
                        outcomes.push(next, probability, 0.0);
                    }
                }
                outcomes
            }
            BlackjackAction::DealerStick => {
                let reward = match state.player_sum.cmp(&state.dealer_sum) {
                    std::cmp::Ordering::Greater => 1.0,
                    std::cmp::Ordering::Less => -1.0,
                    std::cmp::Ordering::Equal => 0.0,
                };
                Outcomes::certain(
                    BlackjackState {
                        turn: Turn::Over,
                        ..*state
                    },
                    reward,
                )
            }
        }
    }
}
