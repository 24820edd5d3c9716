pub mod blog;
pub mod criteria;
pub mod destination;
pub mod domain;
pub mod flight;
pub mod hotel;
pub mod lenient;
pub mod listing;
pub mod pagination;
pub mod promotion;
pub mod review;
pub mod search;
pub mod suggestion;
pub mod tour;
pub mod transport;
