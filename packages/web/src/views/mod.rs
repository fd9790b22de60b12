mod login;
pub use login::Login;

mod protected;
pub use protected::Protected;
