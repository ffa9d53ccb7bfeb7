pub mod chart;
pub mod controls;
pub mod recent;
pub mod view;

pub use view::Dashboard;
