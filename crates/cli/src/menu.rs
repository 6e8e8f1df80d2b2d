#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    ShowTotal,
    MakeOrder,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] =
        [Self::ListProducts, Self::ShowTotal, Self::MakeOrder, Self::Quit];

    /// Accepts the option number, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ListProducts),
            "2" => Some(Self::ShowTotal),
            "3" => Some(Self::MakeOrder),
            "4" => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::ListProducts => 1,
            Self::ShowTotal => 2,
            Self::MakeOrder => 3,
            Self::Quit => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ListProducts => "List all products in store",
            Self::ShowTotal => "Show total amount in store",
            Self::MakeOrder => "Make an order",
            Self::Quit => "Quit",
        }
    }
}
