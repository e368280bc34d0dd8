pub mod clock;
pub mod ids;

pub use clock::{Clock, SystemClock};
pub use ids::{IdGenerator, UuidV4Generator};

/// Output port: publish domain events (no knowledge of transport).
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}
