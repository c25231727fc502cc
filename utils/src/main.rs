mod eval;
mod plot;
mod reference;
mod table;

use structopt::StructOpt;

#[derive(StructOpt)]
pub enum Options {
    Eval(eval::EvalOptions),
    Plot(plot::PlotOptions),
    Table(table::TableOptions),
}

fn main() -> anyhow::Result<()> {
    match Options::from_args() {
        Options::Eval(options) => options.run(),
        Options::Plot(options) => options.run(),
        Options::Table(options) => options.run(),
    }
}
