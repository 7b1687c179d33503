mod curve;
mod enumerate;
mod inputs;
mod objective;
mod optimize;
mod solver;

use clap::{Parser, Subcommand};

pub use self::{curve::curve, enumerate::enumerate, optimize::optimize};
use crate::cli::{curve::CurveArgs, enumerate::EnumerateArgs, optimize::OptimizeArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: find the profit-maximizing split between generating and pumping.
    #[clap(name = "optimize")]
    Optimize(Box<OptimizeArgs>),

    /// Evaluate the profit on a regular grid of split points.
    #[clap(name = "enumerate")]
    Enumerate(Box<EnumerateArgs>),

    /// Print the price-duration curve along with the fitted prices.
    #[clap(name = "curve")]
    Curve(Box<CurveArgs>),
}
