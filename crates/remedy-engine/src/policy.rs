//! Routing policy: self-heal or escalate, given a matched KEDB entry.
//!
//! The choice is a strategy object so the probabilistic production
//! policy can be swapped for a deterministic one in tests without
//! touching the engine's control flow.

use rand::Rng;
use remedy_core::KedbEntry;

/// What to do with a line whose match is self-healable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SelfHeal,
    Ticket,
}

pub trait RoutingPolicy: Send + Sync {
    fn route(&self, entry: &KedbEntry) -> Route;
}

/// Production policy: route a fixed fraction of matched lines to ticket
/// creation anyway, modelling the mixed workload the system is sized
/// for. The remainder self-heal.
#[derive(Debug, Clone)]
pub struct RandomRouting {
    ticket_ratio: f64,
}

impl RandomRouting {
    /// `ticket_ratio` is clamped into [0, 1].
    pub fn new(ticket_ratio: f64) -> Self {
        Self {
            ticket_ratio: ticket_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn ticket_ratio(&self) -> f64 {
        self.ticket_ratio
    }
}

impl Default for RandomRouting {
    /// Keep roughly 70% of matched lines on the self-heal path.
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl RoutingPolicy for RandomRouting {
    fn route(&self, _entry: &KedbEntry) -> Route {
        if rand::thread_rng().gen::<f64>() < self.ticket_ratio {
            Route::Ticket
        } else {
            Route::SelfHeal
        }
    }
}

/// Deterministic policy: every match self-heals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSelfHeal;

impl RoutingPolicy for AlwaysSelfHeal {
    fn route(&self, _entry: &KedbEntry) -> Route {
        Route::SelfHeal
    }
}

/// Deterministic policy: every match escalates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTicket;

impl RoutingPolicy for AlwaysTicket {
    fn route(&self, _entry: &KedbEntry) -> Route {
        Route::Ticket
    }
}
