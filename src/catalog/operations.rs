pub mod icons;
pub mod launch;
