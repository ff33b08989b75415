pub mod cbc {
    mod dec;
    pub use dec::decrypt;
}

mod sha;
pub use sha::sha512_base64;

mod token;
pub use token::Token;
