use std::{fs, io::ErrorKind, sync::Arc, time::Duration};

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    infra::{
        self,
        error::AppError,
        persistence::{FileMedium, PersistenceGateway},
        storage_layout::StorageLayout,
    },
    sim::{ReplySource, SimulatedBackend, VerificationApi},
    store::Store,
    ui::{
        console::{Console, StdConsole},
        login::{run_login, LoginOutcome},
        shell::{Shell, ShellOutcome, SystemClipboard},
    },
    usecases::{
        conversation::ConversationFlow, search::SearchDebouncer, verify_identity::IdentityFlow,
    },
};

pub async fn run(cli: Cli) -> Result<()> {
    let config = infra::config::load(cli.config.as_deref())?;
    let layout = StorageLayout::resolve()?;

    match cli.command_or_default() {
        Command::Run => {
            layout.ensure_dirs()?;
            // Held for the whole run so buffered log lines flush on exit.
            let _log_guard = infra::logging::init(&config.logging, &layout.log_dir)?;

            let gateway =
                PersistenceGateway::new(Arc::new(FileMedium::new(layout.state_file())));
            let store = Store::new(gateway.restore());
            gateway.attach(&store);

            let backend = Arc::new(SimulatedBackend::new(&config.simulation));
            let mut console = StdConsole;

            loop {
                if !store.read(|state| state.identity.is_authenticated) {
                    let countries = backend.list_countries().await;
                    let mut flow = IdentityFlow::new(
                        Arc::clone(&store),
                        Arc::clone(&backend) as Arc<dyn VerificationApi>,
                    );
                    let outcome =
                        run_login(&mut console, &mut flow, &store, &countries).await?;
                    if outcome == LoginOutcome::Aborted {
                        break;
                    }
                }

                let outcome = {
                    let conversation = ConversationFlow::new(
                        Arc::clone(&store),
                        Arc::clone(&backend) as Arc<dyn ReplySource>,
                        &config.simulation,
                    );
                    let debouncer = SearchDebouncer::new(
                        Arc::clone(&store),
                        Duration::from_millis(config.search.debounce_ms),
                    );
                    let mut shell = Shell::new(
                        &mut console,
                        Arc::clone(&store),
                        conversation,
                        debouncer,
                        Box::new(SystemClipboard),
                    );
                    shell.run().await?
                };

                match outcome {
                    ShellOutcome::Quit => break,
                    ShellOutcome::LoggedOut => continue,
                }
            }

            console.print_line("Bye.")?;
        }
        Command::Reset => {
            let state_file = layout.state_file();
            match fs::remove_file(&state_file) {
                Ok(()) => println!("Saved state removed. The next run starts fresh."),
                Err(source) if source.kind() == ErrorKind::NotFound => {
                    println!("Nothing to reset.");
                }
                Err(source) => {
                    return Err(AppError::StateFileRemove {
                        path: state_file,
                        source,
                    }
                    .into());
                }
            }
        }
    }

    Ok(())
}
