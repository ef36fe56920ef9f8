pub mod pwm;
#[cfg(target_os = "none")]
pub mod usart;

pub use pwm::PwmChannel;
#[cfg(target_os = "none")]
pub use usart::Usart;
