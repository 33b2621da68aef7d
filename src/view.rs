use chrono::NaiveDate;
use std::fmt::{self, Display};
use termion::style;

use crate::config::Config;
use crate::export::HEADER;
use crate::grid::{CalendarDay, Grid};

#[derive(Clone, Debug)]
pub struct Theme {
    pub dim_adjacent: bool,
    pub today_char: Option<char>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&Config::default())
    }
}

impl From<&Config> for Theme {
    fn from(config: &Config) -> Self {
        Theme {
            dim_adjacent: config.dim_adjacent,
            today_char: config.today_char,
        }
    }
}

struct DayCell<'a> {
    day: &'a CalendarDay,
    is_today: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_WIDTH: usize = 4;

    fn new(day: &'a CalendarDay, theme: &'a Theme) -> Self {
        DayCell {
            day,
            is_today: false,
            theme,
        }
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        if self.theme.dim_adjacent && !self.day.in_current_month {
            write!(
                f,
                "{}{}{:>width$}{}",
                arg_today,
                style::Faint,
                self.day.day_of_month,
                style::NoFaint,
                width = Self::CELL_WIDTH - 1
            )
        } else {
            write!(
                f,
                "{}{:>width$}",
                arg_today,
                self.day.day_of_month,
                width = Self::CELL_WIDTH - 1
            )
        }
    }
}

/// Text form of a grid: a title, the weekday header and one line per week.
/// `today` is marked if it lies within the grid.
pub struct GridView<'a> {
    grid: &'a Grid,
    theme: &'a Theme,
    today: Option<NaiveDate>,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid, theme: &'a Theme) -> Self {
        GridView {
            grid,
            theme,
            today: None,
        }
    }

    pub fn today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }
}

impl Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_month = self.grid.year_month();
        writeln!(f, "{} {}", year_month.month_name(), year_month.year())?;

        for &head in HEADER.iter() {
            write!(f, "{:>width$}", head, width = DayCell::CELL_WIDTH)?;
        }
        writeln!(f)?;

        for row in self.grid.rows() {
            for slot in row.slots() {
                match slot {
                    Some(day) => write!(
                        f,
                        "{}",
                        DayCell::new(day, self.theme).today(Some(day.date) == self.today)
                    )?,
                    None => write!(f, "{:width$}", "", width = DayCell::CELL_WIDTH)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

pub fn render(grid: &Grid, theme: &Theme, today: Option<NaiveDate>) -> String {
    GridView::new(grid, theme).today(today).to_string()
}
