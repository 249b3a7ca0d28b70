pub mod allocation;
pub mod choice;
pub mod combatant;
pub mod constants;
pub mod damage;

pub use allocation::DamageAllocation;
pub use choice::{resolve, Choice, Winner};
pub use combatant::Combatant;
pub use damage::{damage, special_multiplier, DamageBreakdown};
