//! Inbox command.

use std::error::Error;

use merchstand_storefront::shop::Shop;

/// Read the signed-in user's inbox, newest first.
pub fn list(shop: &Shop) -> Result<(), Box<dyn Error>> {
    let user = shop
        .accounts()
        .current_user()?
        .ok_or("not signed in")?;
    let messages = shop.inbox().messages(&user.email)?;

    if messages.is_empty() {
        println!("Inbox empty.");
        return Ok(());
    }
    for message in &messages {
        println!(
            "  {}  {}",
            message.date.format("%Y-%m-%d %H:%M"),
            message.subject
        );
        println!("    {}", message.preview);
    }
    Ok(())
}
