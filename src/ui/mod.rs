pub mod dialogs;
pub mod intersection;
pub mod pointer;
pub mod speed_slider;

pub use dialogs::FileDialogs;
pub use intersection::{IntersectionView, Layout};
pub use pointer::PointerTracker;
pub use speed_slider::SpeedSlider;
