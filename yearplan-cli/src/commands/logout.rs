use anyhow::Result;

use super::new_session;

pub fn run() -> Result<()> {
    let mut session = new_session()?;
    if session.is_locked() {
        println!("Already logged out.");
        return Ok(());
    }
    session.lock()?;
    println!("Password removed. Run `yearplan login` to unlock again.");
    Ok(())
}
