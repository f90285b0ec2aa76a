use anyhow::{bail, Context, Result};
use realnest::api::{MarketplaceApi, SearchFilters};
use realnest::forms::{LoginForm, PropertyForm, RegisterForm};
use realnest::models::Role;
use realnest::pages::{
    AdminConsole, Banner, DashboardPage, FormMode, HomePage, LoginPage, PropertyDetailsPage, PropertyFormPage,
    RegisterPage,
};
use realnest::pages::property_form::read_image;
use realnest::render;
use realnest::routes::{self, Navigation, Route};
use realnest::session::AuthProvider;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::PropertyArgs;

const MAX_REDIRECTS: usize = 4;

/// Terminal stand-in for the browser router: guards every route and renders the page it lands on
pub struct App {
    auth: AuthProvider,
}

impl App {
    pub fn new(auth: AuthProvider) -> Self {
        Self { auth }
    }

    fn api(&self) -> Arc<dyn MarketplaceApi> {
        self.auth.api()
    }

    /// Follow guard redirects until a route is allowed, then render it
    pub async fn visit(&mut self, route: Route) -> Result<()> {
        let (allowed, from) = self.land(route)?;
        self.render(allowed, from).await
    }

    /// Where the guards send `route` for the current session, and the route a login should return to
    fn land(&self, route: Route) -> Result<(Route, Option<Route>)> {
        let mut target = route;
        let mut from = None;
        for _ in 0..MAX_REDIRECTS {
            match routes::resolve(target, self.auth.session()) {
                Navigation::Allow(allowed) => return Ok((allowed, from)),
                Navigation::Redirect { to, from: origin } => {
                    info!("{} redirects to {}", target, to);
                    from = origin.or(from);
                    target = to;
                }
            }
        }
        bail!("too many redirects starting from {route}")
    }

    /// True when the route's guards let the current session through; otherwise renders the redirect target
    async fn enter(&mut self, route: Route) -> Result<bool> {
        match routes::resolve(route, self.auth.session()) {
            Navigation::Allow(_) => Ok(true),
            Navigation::Redirect { .. } => {
                self.visit(route).await?;
                Ok(false)
            }
        }
    }

    // Renders an already-guarded route; nothing below here may call back into `visit`
    async fn render(&mut self, route: Route, from: Option<Route>) -> Result<()> {
        println!("{}", render::nav_bar(self.auth.session()));
        println!();
        match route {
            Route::Home => self.show_home(SearchFilters::default(), 0).await,
            Route::PropertyDetails(id) => self.show_property(id).await,
            Route::Dashboard => self.dashboard_page(0).await,
            Route::Admin => {
                let mut console = AdminConsole::new(self.api());
                console.load().await;
                print_admin(&console);
                Ok(())
            }
            Route::Login => {
                match from {
                    Some(origin) => println!("Sign in to continue to {origin}."),
                    None => println!("Welcome back."),
                }
                println!("Run `realnest login --email <EMAIL> --password <PASSWORD>`.");
                Ok(())
            }
            Route::Register => {
                println!("Run `realnest register --name <NAME> --email <EMAIL> --password <PASSWORD> --confirm-password <PASSWORD>`.");
                Ok(())
            }
            Route::NewProperty => {
                println!("Run `realnest create --title ... --description ... --price ... --type SALE|RENT --location ...`.");
                Ok(())
            }
            Route::EditProperty(id) => {
                println!("Run `realnest edit {id} [--title ...] [--price ...]` to update this listing.");
                Ok(())
            }
        }
    }

    pub async fn login(&mut self, email: String, password: String) -> Result<()> {
        if !self.enter(Route::Login).await? {
            return Ok(());
        }
        let mut page = LoginPage::new(None);
        page.values = LoginForm { email, password };
        match page.submit(&mut self.auth).await {
            Some(next) => self.visit(next).await,
            None => fail_form(page.error.as_deref(), &render::field_errors(&page.field_errors)),
        }
    }

    pub async fn register(&mut self, values: RegisterForm) -> Result<()> {
        if !self.enter(Route::Register).await? {
            return Ok(());
        }
        let mut page = RegisterPage::new();
        page.values = values;
        match page.submit(&mut self.auth).await {
            Some(next) => self.visit(next).await,
            None => fail_form(page.error.as_deref(), &render::field_errors(&page.field_errors)),
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.auth.logout().context("Failed to clear session")?;
        println!("Signed out.");
        Ok(())
    }

    pub fn whoami(&self) {
        println!("{}", render::nav_bar(self.auth.session()));
        match self.auth.user() {
            Some(user) => println!("{}", render::user_row(user)),
            None => println!("Not signed in."),
        }
    }

    pub async fn show_home(&mut self, filters: SearchFilters, page: u32) -> Result<()> {
        let mut home = HomePage::new(self.api());
        home.search(filters).await;
        if page > 0 && home.list.error.is_none() {
            home.fetch(page).await;
        }
        println!("Find your next home");
        print!("{}", render::property_list(&home.list, "No properties found. Try adjusting your filters."));
        Ok(())
    }

    pub async fn show_property(&mut self, id: i64) -> Result<()> {
        let mut details = PropertyDetailsPage::new(self.api());
        details.load(id).await;
        match (&details.property, &details.error) {
            (_, Some(error)) => bail!("{error}"),
            (Some(property), None) => {
                print!("{}", render::property_details(property));
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    pub async fn show_dashboard(&mut self, page: u32) -> Result<()> {
        if !self.enter(Route::Dashboard).await? {
            return Ok(());
        }
        self.dashboard_page(page).await
    }

    async fn dashboard_page(&mut self, page: u32) -> Result<()> {
        let mut dashboard = DashboardPage::new(self.api());
        dashboard.fetch(page).await;
        print_dashboard(&dashboard);
        Ok(())
    }

    pub async fn delete_property(&mut self, id: i64, assume_yes: bool) -> Result<()> {
        if !self.enter(Route::Dashboard).await? {
            return Ok(());
        }
        let mut dashboard = DashboardPage::new(self.api());
        dashboard.fetch(0).await;
        if !dashboard.delete(id, |prompt| confirm(prompt, assume_yes)).await {
            println!("Cancelled.");
            return Ok(());
        }
        print_dashboard(&dashboard);
        check_banner(&dashboard.banner)
    }

    pub async fn save_property(&mut self, mode: FormMode, fields: PropertyArgs, image: Option<&Path>) -> Result<()> {
        let route = match mode {
            FormMode::Create => Route::NewProperty,
            FormMode::Edit(id) => Route::EditProperty(id),
        };
        if !self.enter(route).await? {
            return Ok(());
        }

        let mut form = PropertyFormPage::new(self.api(), mode);
        form.load().await;
        if let Some(error) = &form.load_error {
            bail!("{error}");
        }
        apply_fields(&mut form.values, fields);

        let image = match image {
            Some(path) => Some(read_image(path).await?),
            None => None,
        };

        println!("{}", form.title());
        match form.submit(image).await {
            Some(next) => {
                println!("Listing saved. Approved listings appear on the marketplace once an admin reviews them.");
                self.visit(next).await
            }
            None => fail_form(form.error.as_deref(), &render::field_errors(&form.field_errors)),
        }
    }

    async fn admin_console(&mut self) -> Result<Option<AdminConsole>> {
        if !self.enter(Route::Admin).await? {
            return Ok(None);
        }
        Ok(Some(AdminConsole::new(self.api())))
    }

    pub async fn admin_pending(&mut self, page: u32) -> Result<()> {
        let Some(mut console) = self.admin_console().await? else {
            return Ok(());
        };
        console.fetch_pending(page).await;
        print!("{}", render::property_list(&console.pending, "No properties awaiting approval."));
        Ok(())
    }

    pub async fn admin_review(&mut self, id: i64, approve: bool, page: u32) -> Result<()> {
        let Some(mut console) = self.admin_console().await? else {
            return Ok(());
        };
        console.fetch_pending(page).await;
        console.review(id, approve).await;
        print!("{}", render::banner(&console.banner));
        print!("{}", render::property_list(&console.pending, "No properties awaiting approval."));
        check_banner(&console.banner)
    }

    pub async fn admin_users(&mut self, page: u32) -> Result<()> {
        let Some(mut console) = self.admin_console().await? else {
            return Ok(());
        };
        console.fetch_users(page).await;
        print!("{}", render::user_table(&console.users));
        Ok(())
    }

    pub async fn admin_set_role(&mut self, id: i64, role: Role, page: u32) -> Result<()> {
        let Some(mut console) = self.admin_console().await? else {
            return Ok(());
        };
        console.fetch_users(page).await;
        console.change_role(id, role).await;
        print!("{}", render::banner(&console.banner));
        print!("{}", render::user_table(&console.users));
        check_banner(&console.banner)
    }

    pub async fn admin_delete_user(&mut self, id: i64, page: u32, assume_yes: bool) -> Result<()> {
        let Some(mut console) = self.admin_console().await? else {
            return Ok(());
        };
        console.fetch_users(page).await;
        if !console.delete_user(id, |prompt| confirm(prompt, assume_yes)).await {
            println!("Cancelled.");
            return Ok(());
        }
        print!("{}", render::banner(&console.banner));
        print!("{}", render::user_table(&console.users));
        check_banner(&console.banner)
    }
}

fn print_dashboard(dashboard: &DashboardPage) {
    println!("My property listings");
    println!("Listings require admin approval before they appear publicly.");
    println!();
    print!("{}", render::banner(&dashboard.banner));
    print!("{}", render::property_list(&dashboard.list, "You have not created any properties yet."));
}

fn print_admin(console: &AdminConsole) {
    println!("Admin console");
    print!("{}", render::banner(&console.banner));
    println!("Pending property approvals");
    print!("{}", render::property_list(&console.pending, "No properties awaiting approval."));
    println!();
    println!("User management");
    print!("{}", render::user_table(&console.users));
}

fn apply_fields(values: &mut PropertyForm, fields: PropertyArgs) {
    let PropertyArgs { title, description, price, property_type, location, contact_email, contact_phone } = fields;
    let updates = [
        (&mut values.title, title),
        (&mut values.description, description),
        (&mut values.price, price),
        (&mut values.property_type, property_type),
        (&mut values.location, location),
        (&mut values.contact_email, contact_email),
        (&mut values.contact_phone, contact_phone),
    ];
    for (slot, value) in updates {
        if let Some(value) = value {
            *slot = value;
        }
    }
}

fn check_banner(banner: &Banner) -> Result<()> {
    match &banner.error {
        Some(error) => bail!("{error}"),
        None => Ok(()),
    }
}

fn fail_form(error: Option<&str>, field_errors: &str) -> Result<()> {
    if !field_errors.is_empty() {
        println!("Please fix the following:");
        print!("{field_errors}");
    }
    bail!("{}", error.unwrap_or("form has errors"))
}

fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
