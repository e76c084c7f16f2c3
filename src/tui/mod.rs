pub mod input;
pub mod mode;
pub mod sliders;
pub mod view;
