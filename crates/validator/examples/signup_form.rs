//! A sign-up form with a conditional shipping address.
//!
//! Run with: `cargo run --example signup_form`

use formguard_validator::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========================================================================
    // Account fields
    // ========================================================================

    let mut signup = Validator::builder()
        .options(ValidatorOptions::from_env())
        .sink(|report: &ValidationReport| {
            println!("{}", report.to_json());
        })
        .build();

    signup
        .add_rule("username", required())?
        .add_rule("username", regex("^[a-z0-9_]{3,16}$")?.message("3-16 lowercase letters, digits or _"))?
        .add_rule("email", required())?
        .add_rule("email", email())?
        .add_rule("age", optional())?
        .add_rule("age", compose_rules![integer(), gte(18).message_fmt("You must be {rhs} or older.")])?
        .add_rule("plan", in_set(["free", "pro", "team", "enterprise"])?.display_limit(2))?;

    // ========================================================================
    // Shipping address, only checked when shipping elsewhere
    // ========================================================================

    let shipping_scope = Scope::root().nested("shipping");
    let mut shipping = Validator::builder()
        .scope(shipping_scope)
        .condition(Condition::new(|values| {
            values.value(&FieldId::from("ship_elsewhere")) == Value::from(true)
        }))
        .build();
    shipping
        .add_rule("street", required())?
        .add_rule("zip", required())?
        .add_rule("zip", regex(r"^\d{5}$")?.message("Five digits"))?;
    signup.add_validator(shipping);

    // ========================================================================
    // Drive it like a UI would
    // ========================================================================

    let mut session = Session::new();
    let handle = session.register(signup);

    let mut form = FormValues::new()
        .with("username", "Ada Lovelace")
        .with("email", "ada@")
        .with("age", 16)
        .with("plan", "gold")
        .with("ship_elsewhere", false);

    println!("-- enable");
    if let Some(validator) = session.get_mut(handle) {
        validator.enable(&form)?;
    }

    println!("-- fix account fields, ask for shipping elsewhere");
    form.set("username", "ada");
    form.set("email", "ada@example.com");
    form.set("age", 36);
    form.set("plan", "pro");
    form.set("ship_elsewhere", true);
    form.set("shipping-zip", "1234");
    session.notify_changed(&form)?;

    println!("-- complete the address");
    form.set("shipping-street", "12 Analytical Row");
    form.set("shipping-zip", "12345");
    session.notify_changed(&form)?;

    if let Some(validator) = session.get(handle) {
        println!("valid: {}", validator.is_valid(&form)?);
    }

    println!("-- leave the page");
    session.remove(handle);
    Ok(())
}
