use std::{io, sync::OnceLock};

use application::{
    notify::AsNotification as _,
    route::{AdminScreen, Destination, Router, StaffScreen},
    screen::Epoch,
    Api, App, Args, Config,
};
use secrecy::SecretBox;
use service::{
    command::{
        ChangePassword, CreateBooking, CreateSeller, CreateSession,
        DeleteBooking, DeleteSeller, DestroySession, ExportBooking,
        RehydrateSession, UpdateBooking, UpdateProfile,
    },
    domain::{
        booking::{self, CheckInDateTime, CheckOutDateTime, ExportFormat},
        seller::{self, Credentials, Password, PasswordChange},
        Booking, Seller,
    },
    form::BookingForm,
    infra::storage::File,
    query,
    read::{
        booking::Filter,
        dashboard::{Month, Year},
    },
    session::Store,
    Command as _,
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { api, storage, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let store = Store::new(File::new(storage.path));
    let app = App::new(Api::new(api.base_url, store.clone()), store);

    let restored = app
        .execute(RehydrateSession)
        .await
        .unwrap_or_else(|e| match e {});
    match &restored {
        Some(session) => log::info!(
            "restored session of `{}` ({})",
            session.seller.full_name,
            session.seller.role,
        ),
        None => log::info!("no persisted session"),
    }

    let epoch = Epoch::default();
    navigate(&app, &epoch, "/").await;

    println!(
        "commands: login <email> <password> | logout | go <path> | \
         new <customer> <phone> <check-in> <check-out> <service...> | \
         edit <id> <check-in> <check-out> | delete <id> | \
         export <id> <pdf|txt|image> | revenue <month> <year> | \
         addseller <email> <phone|-> <full name> | delseller <id> | \
         rename <full name> | passwd <password> | quit",
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let mut args = line.split_whitespace();
        match args.next() {
            Some("login") => {
                login(&app, &epoch, args.next(), args.next()).await;
            }
            Some("logout") => {
                app.execute(DestroySession)
                    .await
                    .unwrap_or_else(|e| match e {});
                navigate(&app, &epoch, "/").await;
            }
            Some("go") => {
                navigate(&app, &epoch, args.next().unwrap_or("/")).await;
            }
            Some("new") => {
                create(&app, &line).await;
            }
            Some("edit") => {
                edit(&app, args.next(), args.next(), args.next()).await;
            }
            Some("delete") => {
                delete(&app, args.next()).await;
            }
            Some("export") => {
                export(&app, args.next(), args.next()).await;
            }
            Some("revenue") => {
                revenue(&app, &epoch, args.next(), args.next()).await;
            }
            Some("addseller") => {
                add_seller(&app, &line).await;
            }
            Some("delseller") => {
                del_seller(&app, &epoch, args.next()).await;
            }
            Some("rename") => {
                rename(&app, &epoch, &line).await;
            }
            Some("passwd") => {
                passwd(&app, &epoch, args.next()).await;
            }
            Some("quit") => break,
            Some(other) => println!("! unknown command `{other}`"),
            None => {}
        }
    }
    Ok(())
}

/// Resolves the given `path` and presents the destination screen.
async fn navigate(app: &App, epoch: &Epoch, path: &str) {
    epoch.bump();
    let session = app.session().current();
    let destination = Router::resolve(path, session.as_ref());

    match destination {
        Destination::Login => println!("> sign in required"),
        Destination::NotFound => println!("> not found"),
        Destination::Admin(screen) => match screen {
            AdminScreen::Dashboard => {
                dashboard(app, epoch, Filter::All).await;
            }
            AdminScreen::Sellers => sellers(app, epoch).await,
            AdminScreen::Bookings => bookings(app, epoch, Filter::All).await,
        },
        Destination::Staff(screen) => {
            let Some(session) = session else {
                return;
            };
            let filter = Filter::for_actor(&session.seller);
            match screen {
                StaffScreen::Dashboard => {
                    dashboard(app, epoch, filter).await;
                }
                StaffScreen::Bookings => bookings(app, epoch, filter).await,
            }
        }
    }
}

async fn login(
    app: &App,
    epoch: &Epoch,
    email: Option<&str>,
    password: Option<&str>,
) {
    let (Some(email), Some(password)) = (email, password) else {
        println!("! usage: login <email> <password>");
        return;
    };
    let Ok(email) = email.parse() else {
        println!("! malformed email address");
        return;
    };
    let Some(password) = Password::new(password) else {
        println!("! malformed password");
        return;
    };

    match app
        .execute(CreateSession(Credentials {
            email,
            password: SecretBox::new(Box::new(password)),
        }))
        .await
    {
        Ok(session) => {
            println!(
                "> signed in as `{}` ({})",
                session.seller.full_name, session.seller.role,
            );
            navigate(app, epoch, "/").await;
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Presents the dashboard of the given `filter` scope.
async fn dashboard(app: &App, epoch: &Epoch, filter: Filter) {
    let ticket = epoch.ticket();
    match app.execute(query::dashboard::Stats::by(filter)).await {
        Ok(stats) => {
            if !epoch.admits(ticket) {
                log::debug!("dropping stale dashboard result");
                return;
            }
            println!(
                "> dashboard: {} bookings, {} revenue",
                stats.total_bookings, stats.total_revenue,
            );
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Presents the seller directory.
async fn sellers(app: &App, epoch: &Epoch) {
    let ticket = epoch.ticket();
    match app.execute(query::sellers::List::by(())).await {
        Ok(sellers) => {
            if !epoch.admits(ticket) {
                log::debug!("dropping stale seller list");
                return;
            }
            println!("> {} seller(s)", sellers.len());
            for seller in sellers {
                println!(
                    "  #{} {} <{}> ({})",
                    seller.id, seller.full_name, seller.email, seller.role,
                );
            }
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Presents the booking listing of the given `filter` scope.
async fn bookings(app: &App, epoch: &Epoch, filter: Filter) {
    let ticket = epoch.ticket();
    match app.execute(query::bookings::List::by(filter)).await {
        Ok(bookings) => {
            if !epoch.admits(ticket) {
                log::debug!("dropping stale booking list");
                return;
            }
            println!("> {} booking(s)", bookings.len());
            for booking in bookings {
                print_booking(&booking);
            }
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

fn print_booking(booking: &Booking) {
    println!(
        "  #{} {} ({}) {} -> {}, {} VND, seller #{}",
        booking.id,
        booking.customer_name,
        booking.phone_number,
        booking.check_in.to_rfc3339(),
        booking.check_out.to_rfc3339(),
        booking.price,
        booking.seller_id,
    );
}

/// Creates a booking out of the `new` command arguments.
async fn create(app: &App, line: &str) {
    let Some(actor) = actor(app) else {
        return;
    };

    let mut args = line.split_whitespace().skip(1);
    let (Some(customer), Some(phone), Some(check_in), Some(check_out)) =
        (args.next(), args.next(), args.next(), args.next())
    else {
        println!(
            "! usage: new <customer> <phone> <check-in> <check-out> \
             <service...>",
        );
        return;
    };
    let service_request = args.collect::<Vec<_>>().join(" ");

    let mut form = BookingForm::default();
    form.synchronize(None, &actor);
    form.customer_name = Some(customer.to_owned());
    form.phone_number = Some(phone.to_owned());
    form.service_request = Some(service_request);
    form.check_in = CheckInDateTime::from_rfc3339(check_in).ok();
    form.check_out = CheckOutDateTime::from_rfc3339(check_out).ok();
    // Admins book for themselves unless they pick another seller; staff
    // have the selection forced anyway.
    form.seller_id = form.seller_id.or(Some(actor.id));

    match app.execute(CreateBooking(form)).await {
        Ok(booking) => println!("> created booking #{}", booking.id),
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Reschedules a booking via the `edit` command.
async fn edit(
    app: &App,
    id: Option<&str>,
    check_in: Option<&str>,
    check_out: Option<&str>,
) {
    let Some(actor) = actor(app) else {
        return;
    };
    let (Some(id), Some(check_in), Some(check_out)) =
        (id, check_in, check_out)
    else {
        println!("! usage: edit <id> <check-in> <check-out>");
        return;
    };
    let Ok(id) = id.parse::<booking::Id>() else {
        println!("! malformed booking id");
        return;
    };

    let listed = match app
        .execute(query::bookings::List::by(Filter::for_actor(&actor)))
        .await
    {
        Ok(listed) => listed,
        Err(e) => {
            println!("! {}", e.as_notification());
            return;
        }
    };
    let Some(booking) = listed.into_iter().find(|b| b.id == id) else {
        println!("! no booking #{id}");
        return;
    };

    let mut form = BookingForm::default();
    form.synchronize(Some(&booking), &actor);
    form.check_in = CheckInDateTime::from_rfc3339(check_in).ok();
    form.check_out = CheckOutDateTime::from_rfc3339(check_out).ok();

    match app.execute(UpdateBooking { id, form }).await {
        Ok(()) => println!("> updated booking #{id}"),
        Err(e) => println!("! {}", e.as_notification()),
    }
}

async fn delete(app: &App, id: Option<&str>) {
    let Some(Ok(id)) = id.map(str::parse::<booking::Id>) else {
        println!("! usage: delete <id>");
        return;
    };

    match app.execute(DeleteBooking(id)).await {
        Ok(()) => println!("> deleted booking #{id}"),
        Err(e) => println!("! {}", e.as_notification()),
    }
}

async fn export(app: &App, id: Option<&str>, format: Option<&str>) {
    let Some(Ok(id)) = id.map(str::parse::<booking::Id>) else {
        println!("! usage: export <id> <pdf|txt|image>");
        return;
    };
    let Some(Ok(format)) = format.map(str::parse::<ExportFormat>) else {
        println!("! usage: export <id> <pdf|txt|image>");
        return;
    };

    match app.execute(ExportBooking { id, format }).await {
        Ok(url) => println!("> open {url}"),
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Presents the per-seller revenue breakdown of a month.
async fn revenue(
    app: &App,
    epoch: &Epoch,
    month: Option<&str>,
    year: Option<&str>,
) {
    let (Some(Ok(month)), Some(Ok(year))) =
        (month.map(str::parse::<u8>), year.map(str::parse::<i32>))
    else {
        println!("! usage: revenue <month> <year>");
        return;
    };
    let Some(month) = Month::new(month) else {
        println!("! month must be within 1..=12");
        return;
    };

    let ticket = epoch.ticket();
    match app
        .execute(query::dashboard::Revenue::by((month, Year::from(year))))
        .await
    {
        Ok(rows) => {
            if !epoch.admits(ticket) {
                log::debug!("dropping stale revenue report");
                return;
            }
            for row in rows {
                println!(
                    "  #{} {}: {}",
                    row.seller_id, row.full_name, row.revenue,
                );
            }
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Registers a new seller via the `addseller` command.
async fn add_seller(app: &App, line: &str) {
    let mut args = line.split_whitespace().skip(1);
    let (Some(email), Some(phone)) = (args.next(), args.next()) else {
        println!("! usage: addseller <email> <phone|-> <full name>");
        return;
    };
    let Ok(email) = email.parse() else {
        println!("! malformed email address");
        return;
    };
    let phone_number = match phone {
        "-" => None,
        digits => match digits.parse() {
            Ok(phone) => Some(phone),
            Err(_) => {
                println!("! malformed phone number");
                return;
            }
        },
    };
    let Ok(full_name) = args.collect::<Vec<_>>().join(" ").parse() else {
        println!("! usage: addseller <email> <phone|-> <full name>");
        return;
    };

    match app
        .execute(CreateSeller(seller::Draft {
            full_name,
            email,
            phone_number,
        }))
        .await
    {
        Ok(()) => println!("> seller registered"),
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Removes a seller via the `delseller` command.
async fn del_seller(app: &App, epoch: &Epoch, id: Option<&str>) {
    let Some(Ok(id)) = id.map(str::parse::<seller::Id>) else {
        println!("! usage: delseller <id>");
        return;
    };

    match app.execute(DeleteSeller(id)).await {
        Ok(()) => {
            println!("> removed seller #{id}");
            // Self-removal destroys the session; land accordingly.
            navigate(app, epoch, "/").await;
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Renames the signed-in seller via a profile patch.
async fn rename(app: &App, epoch: &Epoch, line: &str) {
    let Some(actor) = actor(app) else {
        return;
    };
    let raw = line.strip_prefix("rename").unwrap_or(line).trim();
    let Ok(full_name) = raw.parse::<seller::FullName>() else {
        println!("! usage: rename <full name>");
        return;
    };

    match app
        .execute(UpdateProfile {
            seller_id: actor.id,
            patch: seller::Patch {
                full_name,
                email: actor.email,
                phone_number: actor.phone_number,
                qr_code_url: actor.qr_code_url,
            },
        })
        .await
    {
        Ok(()) => {
            println!("> profile updated, sign in again");
            navigate(app, epoch, "/").await;
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Changes the signed-in seller's own password.
async fn passwd(app: &App, epoch: &Epoch, password: Option<&str>) {
    let Some(actor) = actor(app) else {
        return;
    };
    let Some(password) = password.and_then(Password::new) else {
        println!("! usage: passwd <password>");
        return;
    };

    match app
        .execute(ChangePassword {
            seller_id: actor.id,
            change: PasswordChange {
                password: SecretBox::new(Box::new(password)),
            },
        })
        .await
    {
        Ok(()) => {
            println!("> password changed, sign in again");
            navigate(app, epoch, "/").await;
        }
        Err(e) => println!("! {}", e.as_notification()),
    }
}

/// Returns the signed-in [`Seller`], complaining when there is none.
fn actor(app: &App) -> Option<Seller> {
    let session = app.session().current();
    if session.is_none() {
        println!("! sign in first");
    }
    session.map(|s| s.seller)
}
