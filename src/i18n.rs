use color_eyre::eyre::{
    Report,
    eyre,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    str::FromStr,
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Tamil,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Label {
    Game,
    Player,
    Admin,
    Bet,
    Up,
    Down,
    Timer,
    Result,
    Amount,
    Market,
    BettingTime,
    MarketMoving,
    BettingClosed,
    PlaceYourBet,
    NextResult,
    Random,
    PreviousResults,
    NoResultsYet,
    GameRules,
    RuleBetting,
    RuleWin,
    RuleTie,
    RuleNewRound,
}

impl Language {
    pub fn toggled(self) -> Language {
        match self {
            Language::English => Language::Tamil,
            Language::Tamil => Language::English,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    pub fn label(self, label: Label) -> &'static str {
        match self {
            Language::English => english(label),
            Language::Tamil => tamil(label),
        }
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::Game => "Game",
        Label::Player => "Player",
        Label::Admin => "Admin",
        Label::Bet => "Bet",
        Label::Up => "UP",
        Label::Down => "DOWN",
        Label::Timer => "Timer",
        Label::Result => "Result",
        Label::Amount => "Amount",
        Label::Market => "Market",
        Label::BettingTime => "Betting Time",
        Label::MarketMoving => "Market Moving...",
        Label::BettingClosed => "Betting closed",
        Label::PlaceYourBet => "Place Your Bet",
        Label::NextResult => "Next result",
        Label::Random => "random",
        Label::PreviousResults => "Previous Results",
        Label::NoResultsYet => "No previous results yet",
        Label::GameRules => "Game Rules",
        Label::RuleBetting => "Place bets during the betting phase",
        Label::RuleWin => "If your prediction is correct, you win 2x your bet amount",
        Label::RuleTie => "If market ends in TIE, both sides lose their bets",
        Label::RuleNewRound => "New round starts automatically after results",
    }
}

fn tamil(label: Label) -> &'static str {
    match label {
        Label::Game => "விளையாட்டு",
        Label::Player => "விளையாட்டாளர்",
        Label::Admin => "நிர்வாகி",
        Label::Bet => "பணயம்",
        Label::Up => "மேலே",
        Label::Down => "கீழே",
        Label::Timer => "நேரம்",
        Label::Result => "முடிவு",
        Label::Amount => "தொகை",
        Label::Market => "சந்தை",
        Label::BettingTime => "பணய நேரம்",
        Label::MarketMoving => "சந்தை நகர்கிறது...",
        Label::BettingClosed => "பணயம் மூடப்பட்டது",
        Label::PlaceYourBet => "உங்கள் பணயத்தை வையுங்கள்",
        Label::NextResult => "அடுத்த முடிவு",
        Label::Random => "சீரற்ற",
        Label::PreviousResults => "முந்தைய முடிவுகள்",
        Label::NoResultsYet => "இதுவரை முடிவுகள் இல்லை",
        Label::GameRules => "விளையாட்டு விதிகள்",
        Label::RuleBetting => "பணய நேரத்தில் மட்டுமே பணயம் வைக்கலாம்",
        Label::RuleWin => "கணிப்பு சரியானால் பணயத் தொகையின் 2 மடங்கு வெற்றி",
        Label::RuleTie => "சந்தை சமமாக முடிந்தால் இரு பக்கமும் தோல்வி",
        Label::RuleNewRound => "முடிவுக்குப் பின் புதிய சுற்று தானாகத் தொடங்கும்",
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ta" | "tamil" => Ok(Language::Tamil),
            other => Err(eyre!("unsupported language '{other}', expected en or ta")),
        }
    }
}
