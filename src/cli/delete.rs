//! Delete command implementation.

use clap::Args;

use crate::error::{EditError, Result};
use crate::output::Printer;
use crate::store::ArtworkStore;

use super::ProjectArgs;

/// Delete a stored artwork
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Artwork key
    pub key: String,
}

pub fn run(args: DeleteArgs, printer: &Printer) -> Result<()> {
    let (_, mut store) = args.project.open()?;

    if !store.delete(&args.key)? {
        return Err(EditError::Store {
            key: args.key,
            message: "no such artwork".to_string(),
        });
    }

    printer.success("Deleted", &args.key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::project;
    use crate::types::Artwork;
    use tempfile::tempdir;

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let (_, mut store) = project(dir.path()).open().unwrap();
        store.save(&Artwork::new("doomed", 1, 1)).unwrap();

        let args = || DeleteArgs {
            project: project(dir.path()),
            key: "doomed".to_string(),
        };
        run(args(), &Printer::new()).unwrap();

        assert!(store.get("doomed").unwrap().is_none());
        assert!(run(args(), &Printer::new()).is_err());
    }
}
