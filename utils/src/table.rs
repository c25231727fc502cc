use anyhow::bail;
use structopt::StructOpt;

use rationals::coeffs;

#[derive(StructOpt)]
pub struct TableOptions {
    /// Only show entries tuned against this function
    #[structopt(long)]
    func: Option<String>,
}

impl TableOptions {
    pub fn run(&self) -> anyhow::Result<()> {
        let mut shown = 0;

        for (func, version, degrees) in coeffs::available() {
            if self.func.as_deref().is_some_and(|want| want != func) {
                continue;
            }

            println!("{func:<12} {version} {}/{}", degrees.0, degrees.1);
            shown += 1;
        }

        if shown == 0 {
            bail!("No tuned entries for the requested function!");
        }

        Ok(())
    }
}
