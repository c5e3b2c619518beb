//! Bot API records and unions.

mod background;
mod boost;
mod bot;
mod business;
mod callback;
mod chat;
mod chat_member;
mod inline;
mod markup;
mod media;
mod message;
mod passport;
mod payments;
mod poll;
mod reaction;
mod update;

pub use background::*;
pub use boost::*;
pub use bot::*;
pub use business::*;
pub use callback::*;
pub use chat::*;
pub use chat_member::*;
pub use inline::*;
pub use markup::*;
pub use media::*;
pub use message::*;
pub use passport::*;
pub use payments::*;
pub use poll::*;
pub use reaction::*;
pub use update::*;
