mod checker;
mod environment;
