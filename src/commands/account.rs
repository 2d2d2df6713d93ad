// Account commands
// register, login, logout and the password reset pair

use crate::{Data, Error};

pub async fn register(data: &Data, name: &str, email: &str, password: &str) -> Result<(), Error> {
    let session = data.store.register(name, email, password)?;
    println!("Registered {} <{}>. Log in to get started.", session.name, session.email);
    Ok(())
}

pub async fn login(data: &Data, email: &str, password: &str) -> Result<(), Error> {
    let (session, profile) = data.store.login(email, password)?;
    println!("Welcome back, {}!", session.name);
    if profile.profile.weight.is_empty() || profile.profile.height.is_empty() {
        println!("Tip: add your height and weight with `fitbuddy profile set` to see your BMI.");
    }
    Ok(())
}

pub async fn logout(data: &Data) -> Result<(), Error> {
    data.store.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn forgot_password(data: &Data, email: &str) -> Result<(), Error> {
    data.store.request_password_reset(email)?;
    println!("If an account exists for {}, you can now run `fitbuddy reset-password`.", email.trim());
    Ok(())
}

pub async fn reset_password(data: &Data, password: &str, confirm: &str) -> Result<(), Error> {
    data.store.reset_password(password, confirm)?;
    println!("Password updated. You can now log in.");
    Ok(())
}
