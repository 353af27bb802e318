mod errors;
mod init;
mod load;
mod logging;
mod rank;
mod related;
mod score;
