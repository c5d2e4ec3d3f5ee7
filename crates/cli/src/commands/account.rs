//! Account commands.

use std::error::Error;

use merchstand_storefront::shop::Shop;

/// Create an account and sign in.
pub fn register(shop: &Shop, name: &str, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
    let user = shop.accounts().register(name, email, password)?;
    println!("Welcome, {}! You are now signed in as {}.", user.name, user.email);
    Ok(())
}

/// Sign in.
pub fn login(shop: &Shop, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
    let user = shop.accounts().login(email, password)?;
    println!("Signed in as {}.", user.email);
    Ok(())
}

/// Sign out.
pub fn logout(shop: &Shop) -> Result<(), Box<dyn Error>> {
    shop.accounts().logout()?;
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in user.
pub fn whoami(shop: &Shop) -> Result<(), Box<dyn Error>> {
    match shop.accounts().current_user()? {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("Registered: {}", user.registered_at.format("%Y-%m-%d"));
            println!(
                "Newsletter: {}, notifications: {}",
                user.preferences.newsletter, user.preferences.notifications
            );
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Change the signed-in user's password.
pub fn change_password(shop: &Shop, current: &str, new: &str) -> Result<(), Box<dyn Error>> {
    shop.accounts().change_password(current, new)?;
    println!("Password changed.");
    Ok(())
}

/// Update the signed-in user's name and email.
pub fn update(shop: &Shop, name: &str, email: &str) -> Result<(), Box<dyn Error>> {
    let user = shop.profile().update_personal_info(name, email)?;
    println!("Profile updated: {} <{}>.", user.name, user.email);
    Ok(())
}
