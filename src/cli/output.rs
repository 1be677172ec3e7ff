use colored::Colorize;
use std::fmt;

pub fn info(message: impl fmt::Display) {
    println!("{message}");
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", message.to_string().yellow());
}
