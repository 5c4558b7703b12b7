use std::io;

use crate::{
    sim::countries::{default_country, Country},
    store::SharedStore,
    usecases::{validate, verify_identity::IdentityFlow},
};

use super::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    /// Input closed (EOF) before the flow completed.
    Aborted,
}

/// Three-step login wizard: country + phone, OTP (with resend), name.
/// Shape validation happens here, before the flow is invoked; the flow's
/// `last_error` is echoed verbatim when a step fails.
pub async fn run_login(
    console: &mut dyn Console,
    flow: &mut IdentityFlow,
    store: &SharedStore,
    countries: &[Country],
) -> io::Result<LoginOutcome> {
    console.print_line("Welcome to confab. Let's verify your phone number.")?;

    let Some(dial_code) = collect_country(console, countries)? else {
        return abort(console);
    };

    if collect_phone(console, flow, store, &dial_code).await?.is_none() {
        return abort(console);
    }

    if collect_otp(console, flow, store).await?.is_none() {
        return abort(console);
    }

    let Some(name) = collect_name(console, flow)? else {
        return abort(console);
    };

    console.print_line(&format!("Welcome, {name}! You're all set."))?;
    Ok(LoginOutcome::LoggedIn)
}

fn abort(console: &mut dyn Console) -> io::Result<LoginOutcome> {
    console.print_line("Input closed. Run confab again to finish signing in.")?;
    Ok(LoginOutcome::Aborted)
}

fn collect_country(
    console: &mut dyn Console,
    countries: &[Country],
) -> io::Result<Option<String>> {
    for (index, country) in countries.iter().enumerate() {
        console.print_line(&format!(
            "{:>2}) {} ({})",
            index + 1,
            country.name,
            country.dial_code
        ))?;
    }

    let default = default_country(countries);
    let prompt = match default {
        Some(country) => format!("Country [{} {}]: ", country.code, country.dial_code),
        None => "Country: ".to_owned(),
    };

    loop {
        let Some(input) = console.prompt_line(&prompt)? else {
            return Ok(None);
        };

        if input.is_empty() {
            if let Some(country) = default {
                return Ok(Some(country.dial_code.to_owned()));
            }
        }

        match input.parse::<usize>() {
            Ok(number) if (1..=countries.len()).contains(&number) => {
                return Ok(Some(countries[number - 1].dial_code.to_owned()));
            }
            _ => console.print_line("Pick a country by its number from the list.")?,
        }
    }
}

async fn collect_phone(
    console: &mut dyn Console,
    flow: &mut IdentityFlow,
    store: &SharedStore,
    dial_code: &str,
) -> io::Result<Option<()>> {
    loop {
        let Some(digits) = console.prompt_line("Phone number (digits only): ")? else {
            return Ok(None);
        };

        if !validate::is_valid_phone(&digits) {
            console.print_line("Phone numbers are 10-15 digits, without the dial code.")?;
            continue;
        }

        if flow.submit_phone(dial_code, &digits).await.is_ok() {
            console.print_line("Code sent. Check your messages.")?;
            return Ok(Some(()));
        }

        print_last_error(console, store)?;
    }
}

async fn collect_otp(
    console: &mut dyn Console,
    flow: &mut IdentityFlow,
    store: &SharedStore,
) -> io::Result<Option<()>> {
    console.print_line("Enter the 6-digit code, or type 'resend' for a new one.")?;

    loop {
        let Some(input) = console.prompt_line("Code: ")? else {
            return Ok(None);
        };

        if input.eq_ignore_ascii_case("resend") {
            match flow.resend().await {
                Ok(()) => console.print_line("Code resent.")?,
                Err(_) => console.print_line("Could not resend the code. Try again.")?,
            }
            continue;
        }

        if !validate::is_valid_otp(&input) {
            console.print_line("The code is exactly 6 digits.")?;
            continue;
        }

        if flow.submit_otp(&input).await.is_ok() {
            console.print_line("Code verified.")?;
            return Ok(Some(()));
        }

        print_last_error(console, store)?;
    }
}

fn collect_name(
    console: &mut dyn Console,
    flow: &mut IdentityFlow,
) -> io::Result<Option<String>> {
    loop {
        let Some(name) = console.prompt_line("Your name: ")? else {
            return Ok(None);
        };

        if !validate::is_valid_name(&name) {
            console.print_line("Names are 2-50 characters.")?;
            continue;
        }

        match flow.submit_name(&name) {
            Ok(profile) => return Ok(Some(profile.name)),
            Err(_) => console.print_line("Something went wrong. Enter your name again.")?,
        }
    }
}

fn print_last_error(console: &mut dyn Console, store: &SharedStore) -> io::Result<()> {
    let message = store.read(|state| state.identity.last_error.clone());
    console.print_line(message.as_deref().unwrap_or("Something went wrong. Try again."))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        domain::identity::VerificationStage,
        infra::config::SimulationConfig,
        sim::{countries::COUNTRIES, SimulatedBackend, VerificationApi},
        store::{AppState, Store},
        ui::console::fake::FakeConsole,
    };

    fn instant_backend() -> Arc<SimulatedBackend> {
        Arc::new(SimulatedBackend::new(&SimulationConfig {
            request_delay_ms: 0,
            directory_delay_ms: 0,
            composing_min_ms: 0,
            composing_max_ms: 0,
        }))
    }

    fn wizard_parts() -> (crate::store::SharedStore, IdentityFlow) {
        let store = Store::new(AppState::default());
        let flow = IdentityFlow::new(
            Arc::clone(&store),
            instant_backend() as Arc<dyn VerificationApi>,
        );
        (store, flow)
    }

    #[tokio::test]
    async fn happy_path_with_default_country_logs_in() {
        let (store, mut flow) = wizard_parts();
        let mut console = FakeConsole::new(vec![
            Some(""),           // default country (+1)
            Some("5551234567"), // phone
            Some("123456"),     // otp
            Some("Sam"),        // name
        ]);

        let outcome = run_login(&mut console, &mut flow, &store, &COUNTRIES)
            .await
            .expect("wizard should complete");

        assert_eq!(outcome, LoginOutcome::LoggedIn);
        assert!(store.read(|state| state.identity.is_authenticated));
        assert_eq!(
            store.read(|state| state.identity.user.as_ref().map(|user| user.phone.clone())),
            Some("+15551234567".to_owned())
        );
        assert!(console.printed("Welcome, Sam"));
    }

    #[tokio::test]
    async fn malformed_otp_is_rejected_before_the_flow_and_retried() {
        let (store, mut flow) = wizard_parts();
        let mut console = FakeConsole::new(vec![
            Some("3"),          // United Kingdom
            Some("5551234567"),
            Some("12a456"),
            Some("123456"),
            Some("Sam"),
        ]);

        let outcome = run_login(&mut console, &mut flow, &store, &COUNTRIES)
            .await
            .expect("wizard should complete");

        assert_eq!(outcome, LoginOutcome::LoggedIn);
        assert!(console.printed("exactly 6 digits"));
        assert_eq!(
            store.read(|state| state.identity.user.as_ref().map(|user| user.country_code.clone())),
            Some("+44".to_owned())
        );
    }

    #[tokio::test]
    async fn resend_keeps_the_otp_stage() {
        let (store, mut flow) = wizard_parts();
        let mut console = FakeConsole::new(vec![
            Some(""),
            Some("5551234567"),
            Some("resend"),
            None, // then give up
        ]);

        let outcome = run_login(&mut console, &mut flow, &store, &COUNTRIES)
            .await
            .expect("wizard should complete");

        assert_eq!(outcome, LoginOutcome::Aborted);
        assert!(console.printed("Code resent."));
        assert_eq!(
            store.read(|state| state.identity.stage),
            VerificationStage::AwaitingOtp
        );
    }

    #[tokio::test]
    async fn eof_at_the_first_prompt_aborts_cleanly() {
        let (store, mut flow) = wizard_parts();
        let mut console = FakeConsole::new(vec![None]);

        let outcome = run_login(&mut console, &mut flow, &store, &COUNTRIES)
            .await
            .expect("wizard should complete");

        assert_eq!(outcome, LoginOutcome::Aborted);
        assert!(!store.read(|state| state.identity.is_authenticated));
    }
}
