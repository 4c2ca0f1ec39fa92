pub mod chart;
pub mod play;
pub mod rating;
pub mod score;
pub mod search;
pub mod song_data;
