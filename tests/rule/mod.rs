mod build;
mod describe;
mod next;
mod options;
mod ranges;
mod seq;
