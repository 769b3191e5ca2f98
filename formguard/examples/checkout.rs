//! Checkout Example
//!
//! A scripted checkout form driven from a tokio task:
//! - Telephone and credit card masks
//! - Required email with the host's own address check
//! - Name and city sharing one error target
//!
//! Engine activity is logged to checkout.log.

use std::fs::File;
use std::sync::Arc;

use formguard::driver;
use formguard::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    let log_file = File::create("checkout.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut engine = Engine::with_clock(EngineConfig::default(), Arc::new(TokioClock));
    let form = engine.create_form();
    let address = engine.create_target();

    let email = engine
        .register(
            form,
            TextField::new("email")
                .with_label("Email")
                .with_kind(InputKind::Email),
            FieldConfig::new().required(true),
        )
        .expect("form exists");
    let name = engine
        .register(
            form,
            TextField::new("name").with_label("Name"),
            FieldConfig::new().target(address).required(true).min_length(2),
        )
        .expect("form exists");
    let city = engine
        .register(
            form,
            TextField::new("city").with_label("City"),
            FieldConfig::new().target(address).min_length(2),
        )
        .expect("form exists");
    let phone = engine
        .register(form, TextField::new("phone").with_label("Phone"), FieldConfig::telephone())
        .expect("form exists");
    let card = engine
        .register(form, TextField::new("card").with_label("Card"), FieldConfig::credit_card())
        .expect("form exists");

    let (handle, mut repaints, task) = driver::spawn(engine);

    // Typing goes through the same key filter a real host would use
    let (phone_id, card_id) = (phone.id, card.id);
    handle
        .call(move |engine| -> Result<(), formguard::EngineError> {
            engine.type_text(phone_id, "555x123")?;
            engine.paste(card_id, "4111 1111 1111 1112")?;
            engine.blur(card_id)?;
            Ok(())
        })
        .await
        .expect("engine running")
        .expect("fields exist");

    handle.set_value(name.id, "A").await.expect("engine running");
    handle.set_value(city.id, "Oslo").await.expect("engine running");

    print_result("first attempt", &handle.submit(form).await.expect("engine running"));
    if let Some(pass) = repaints.recv().await {
        for view in &pass.targets {
            if view.visibility == Visibility::Open {
                println!("target {} ({} line(s)):\n{}", view.id, view.height, view.text);
            }
        }
    }

    handle.set_value(email.id, "ada@example.com").await.expect("engine running");
    handle.set_value(name.id, "Ada").await.expect("engine running");
    handle.set_value(phone.id, "5551234567").await.expect("engine running");
    handle.set_value(card.id, "4111111111111111").await.expect("engine running");

    print_result("second attempt", &handle.submit(form).await.expect("engine running"));
    println!("phone: {}", handle.value(phone.id).await.expect("engine running"));
    println!("card:  {}", handle.value(card.id).await.expect("engine running"));

    drop(handle);
    let engine = task.await.expect("engine task panicked");
    let snapshot = engine.snapshot(card.id).expect("card registered");
    println!("card masked as {:?}", snapshot.masked);

    Ok(())
}

fn print_result(label: &str, result: &ValidationResult) {
    match result {
        ValidationResult::Valid => println!("{}: submitted", label),
        ValidationResult::Invalid(errors) => {
            println!("{}: blocked", label);
            for error in errors {
                println!("  {} - {}", error.field_name, error.message);
            }
        }
    }
}
