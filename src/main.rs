mod catalog;
mod compositor;
mod config;
mod daemon;
mod dock;
mod ipc;
mod paths;

use crate::catalog::{AppCatalog, DesktopCatalog};
use crate::compositor::HyprlandSource;
use crate::config::load_cfg;
use crate::daemon::{pinned_path, run};
use crate::dock::{Dock, IdentityResolver, PinnedConfigBus, PinnedEntry, PinnedStore};
use crate::ipc::send_line;
use crate::paths::{PATH_CONTROL_SOCKET, PATH_DATA_DIRS};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    let config = load_cfg();

    let code = match args.first().map(String::as_str) {
        None | Some("run") => match run(config) {
            Ok(()) => 0,
            Err(e) => {
                log::error!("Dock failed: {}", e);
                1
            }
        },
        Some("list") => {
            let bus = PinnedConfigBus::new();
            let path = pinned_path(&config);
            let catalog = DesktopCatalog::load(&PATH_DATA_DIRS);
            let dock = Dock::new(HyprlandSource::new(), catalog, config, path, &bus);
            match serde_json::to_string_pretty(&dock.view()) {
                Ok(json) => {
                    println!("{}", json);
                    0
                }
                Err(e) => {
                    log::error!("Could not render dock: {}", e);
                    1
                }
            }
        }
        Some(cmd @ ("pin" | "unpin")) => {
            let Some(identifier) = args.get(1) else {
                eprintln!("{}", USAGE_TEXT);
                std::process::exit(1);
            };
            let resolver = IdentityResolver::new(DesktopCatalog::load(&PATH_DATA_DIRS).list_apps());
            let mut store = PinnedStore::new(pinned_path(&config));
            store.load(&resolver);

            let changed = if cmd == "pin" {
                let entry = match resolver.resolve_str(identifier) {
                    Some(app) => PinnedEntry::from_app(app),
                    None => {
                        log::warn!("No installed app matches {:?}; pinning by name", identifier);
                        PinnedEntry::named(identifier)
                    }
                };
                store.add(entry)
            } else {
                store.remove_matching(identifier, &resolver) > 0
            };

            if store.has_unsaved_changes() {
                log::error!("Could not write {}", store.path().display());
                1
            } else {
                if changed {
                    notify_daemon();
                } else {
                    log::info!("Pinned list unchanged");
                }
                0
            }
        }
        Some("notify") => {
            notify_daemon();
            0
        }
        Some(other) => {
            eprintln!("Unknown command {:?}", other);
            eprintln!("{}", USAGE_TEXT);
            1
        }
    };

    std::process::exit(code);
}

fn notify_daemon() {
    if let Err(e) = send_line(&PATH_CONTROL_SOCKET, "notify") {
        log::info!("No running dock to notify ({})", e);
    }
}

static USAGE_TEXT: &str = r#"
Usage: hyprdock [COMMAND]

Commands:
    run                 Run the dock, reading renderer commands on stdin and writing dock state as JSON lines (default)
    list                Print the current dock slots as JSON and exit
    pin <app>           Pin an app by desktop id, class, executable or name
    unpin <app>         Remove every pinned entry matching <app>
    notify              Ask a running dock to re-read the pinned list

Options:
    -h, --help          Show this text

Environment:
    RUST_LOG            Log filter (default: info)
"#;
