//! The export workflow: log in, list the playlists, then scrape each
//! playlist's tracks.

use crate::browser::{Launcher, Session};
use crate::error::Error;
use crate::info::{self, Outcome};
use crate::progress::{self, Delays};
use crate::{fetch, output, types, util, Config};
use std::io::BufRead;
use std::time::Duration;
use tracing::{info, warn};

pub fn run<L: Launcher, R: BufRead>(
    config: &Config,
    session: &mut Session<L>,
    mut reader: R,
    delays: &Delays,
) -> types::UnitResult {
    session.start()?;
    login(config, session, &mut reader)?;

    let dir = util::guarantee_dir_path(config.account_dir())?;
    info!("Writing to {}", dir.display());

    if config.playlists {
        playlists(config, session, delays)?;
    }
    if config.tracks {
        let results = tracks(config, session, delays)?;
        println!("\n{}", info::summary(&results)?);
    }

    info!("done!");
    Ok(())
}

/// Open the listing page and wait for the user to log in by hand.
fn login<L: Launcher, R: BufRead>(
    config: &Config,
    session: &mut Session<L>,
    reader: &mut R,
) -> types::UnitResult {
    let url = config.listing_url()?;
    if let Err(e) = fetch::fetch(session, &url, false, Duration::ZERO) {
        if !e.is_fetch() {
            return Err(e);
        }
        warn!("{}", e);
    }
    util::input(
        "Log in to Amazon Music in the browser, then press Enter here to continue...",
        reader,
    )?;
    Ok(())
}

/// Scrape the playlist listing into `playlists.csv`. The header is written
/// first, so the file exists even when the listing could not be loaded.
fn playlists<L: Launcher>(
    config: &Config,
    session: &mut Session<L>,
    delays: &Delays,
) -> types::UnitResult {
    let path = config.playlists_path();
    output::create_playlists(&path)?;

    let url = config.listing_url()?;
    match progress::scrape_playlists(session, &url, delays) {
        Ok(playlists) => {
            info!("Found {} playlists", playlists.len());
            output::append_playlists(&path, &playlists)?;
        }
        Err(e) if e.is_fetch() => warn!("Could not get page: {}", url),
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Scrape every playlist in `playlists.csv`, appending its tracks to
/// `tracks.csv` as soon as the playlist is done. Playlists whose URL does not
/// resolve or whose page could not be loaded are skipped.
fn tracks<L: Launcher>(
    config: &Config,
    session: &mut Session<L>,
    delays: &Delays,
) -> types::Result<Vec<(String, Outcome)>> {
    let listing = config.playlists_path();
    if !listing.is_file() {
        return Err(Error::Config(format!(
            "Playlist listing not found: {}. Run without --no-playlists first",
            listing.display()
        )));
    }
    let playlists = output::read_playlists(&listing)?;

    let path = config.tracks_path();
    output::create_tracks(&path)?;

    let total = playlists.len();
    let mut results = Vec::with_capacity(total);
    for (i, playlist) in playlists.iter().enumerate() {
        info!("Playlist {} of {}: {}", i + 1, total, playlist.title);
        let url = match config.playlist_url(playlist) {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    "Skipping {}: bad playlist url {:?}: {}",
                    playlist.title, playlist.url, e
                );
                let outcome = Outcome::Failed(String::from("bad url"));
                results.push((playlist.title.clone(), outcome));
                continue;
            }
        };

        let outcome = match progress::scrape_tracks(session, playlist, &url, delays) {
            Ok(tracks) => {
                output::append_tracks(&path, &tracks)?;
                Outcome::Written(tracks.len())
            }
            Err(e) if e.is_fetch() => {
                warn!("Could not get page: {}", url);
                Outcome::Failed(String::from("could not get page"))
            }
            Err(e) => return Err(e),
        };
        results.push((playlist.title.clone(), outcome));
    }

    Ok(results)
}
