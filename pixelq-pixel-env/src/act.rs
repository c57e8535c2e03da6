//! Action for pixel environments.
use pixelq_core::Act;

#[derive(Debug, Clone)]
/// A discrete action, an index into the environment's action set.
pub struct DiscreteAct {
    pub act: u8,
}

impl DiscreteAct {
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl Act for DiscreteAct {}

impl From<u8> for DiscreteAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}

impl From<DiscreteAct> for u8 {
    fn from(act: DiscreteAct) -> Self {
        act.act
    }
}
