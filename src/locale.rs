//! Fixed Polish-style text fragments used to flesh out station, driver and
//! voivodeship fields. There is no external locale/faker dependency: like the
//! teacher's `synthetic::utils` pool of Indian station and train names, this
//! is a handful of constant arrays drawn from with `RngSubstrate::choose`.

use crate::rng::RngSubstrate;

pub const VOIVODESHIPS: [&str; 16] = [
    "Dolnośląskie",
    "Kujawsko-Pomorskie",
    "Lubelskie",
    "Lubuskie",
    "Łódzkie",
    "Małopolskie",
    "Mazowieckie",
    "Opolskie",
    "Podkarpackie",
    "Podlaskie",
    "Pomorskie",
    "Śląskie",
    "Świętokrzyskie",
    "Warmińsko-Mazurskie",
    "Wielkopolskie",
    "Zachodniopomorskie",
];

pub const COASTAL: [&str; 2] = ["Pomorskie", "Zachodniopomorskie"];
pub const MOUNTAIN: [&str; 3] = ["Małopolskie", "Podkarpackie", "Śląskie"];

pub const CITIES: [&str; 96] = [
    "Wrocław", "Bydgoszcz", "Toruń", "Lublin", "Zielona Góra", "Gorzów Wielkopolski",
    "Łódź", "Kraków", "Tarnów", "Nowy Sącz", "Warszawa", "Radom", "Płock", "Siedlce",
    "Opole", "Nysa", "Rzeszów", "Przemyśl", "Mielec", "Białystok", "Suwałki", "Łomża",
    "Gdańsk", "Gdynia", "Słupsk", "Katowice", "Częstochowa", "Bielsko-Biała", "Sosnowiec",
    "Gliwice", "Zabrze", "Kielce", "Ostrowiec Świętokrzyski", "Olsztyn", "Elbląg",
    "Ełk", "Poznań", "Kalisz", "Konin", "Piła", "Szczecin", "Koszalin", "Stargard",
    "Świnoujście", "Legnica", "Wałbrzych", "Jelenia Góra", "Głogów", "Włocławek",
    "Grudziądz", "Inowrocław", "Chełm", "Zamość", "Biała Podlaska", "Puławy",
    "Skierniewice", "Piotrków Trybunalski", "Sieradz", "Zgierz", "Oświęcim",
    "Chrzanów", "Zakopane", "Wadowice", "Ciechanów", "Ostrołęka", "Sochaczew",
    "Kędzierzyn-Koźle", "Brzeg", "Kluczbork", "Krosno", "Jarosław", "Stalowa Wola",
    "Sanok", "Dębica", "Augustów", "Hajnówka", "Bielsk Podlaski", "Tczew", "Starogard Gdański",
    "Kwidzyn", "Malbork", "Chorzów", "Ruda Śląska", "Rybnik", "Tychy", "Jastrzębie-Zdrój",
    "Starachowice", "Sandomierz", "Skarżysko-Kamienna", "Busko-Zdrój", "Giżycko", "Kętrzyn",
    "Mrągowo", "Leszno", "Ostrów Wielkopolski", "Gniezno", "Świecie", "Żary",
];

pub const FIRST_NAMES_MALE: [&str; 40] = [
    "Adam", "Andrzej", "Bartosz", "Damian", "Dawid", "Dominik", "Grzegorz", "Jacek",
    "Jakub", "Jan", "Jerzy", "Kamil", "Karol", "Krzysztof", "Łukasz", "Maciej",
    "Marcin", "Marek", "Mariusz", "Mateusz", "Michał", "Norbert", "Paweł", "Piotr",
    "Przemysław", "Radosław", "Rafał", "Robert", "Sebastian", "Szymon", "Tadeusz",
    "Tomasz", "Wiesław", "Wojciech", "Zbigniew", "Artur", "Bogdan", "Cezary",
    "Dariusz", "Ignacy",
];

pub const FIRST_NAMES_FEMALE: [&str; 40] = [
    "Agnieszka", "Alicja", "Anna", "Barbara", "Beata", "Dorota", "Elżbieta", "Ewa",
    "Grażyna", "Halina", "Irena", "Iwona", "Joanna", "Jolanta", "Justyna", "Katarzyna",
    "Kinga", "Krystyna", "Magdalena", "Małgorzata", "Marta", "Marzena", "Monika",
    "Natalia", "Paulina", "Renata", "Sylwia", "Teresa", "Urszula", "Wiesława",
    "Zofia", "Aleksandra", "Danuta", "Edyta", "Gabriela", "Helena", "Jadwiga",
    "Karolina", "Lucyna", "Weronika",
];

pub const LAST_NAMES: [&str; 50] = [
    "Nowak", "Kowalski", "Wiśniewski", "Wójcik", "Kowalczyk", "Kamiński", "Lewandowski",
    "Zieliński", "Szymański", "Woźniak", "Dąbrowski", "Kozłowski", "Jankowski",
    "Mazur", "Kwiatkowski", "Krawczyk", "Piotrowski", "Grabowski", "Nowakowski",
    "Pawłowski", "Michalski", "Nowicki", "Adamczyk", "Dudek", "Zając", "Wieczorek",
    "Jabłoński", "Król", "Majewski", "Olszewski", "Stępień", "Malinowski", "Jaworski",
    "Witkowski", "Walczak", "Sikora", "Baran", "Rutkowski", "Michalak", "Szewczyk",
    "Ostrowski", "Tomaszewski", "Pietrzak", "Marciniak", "Wróbel", "Zalewski",
    "Wróblewski", "Jakubowski", "Górski", "Sadowski",
];

pub fn random_city(rng: &mut RngSubstrate) -> String {
    (*rng.choose(&CITIES)).to_string()
}

pub fn random_voivodeship(rng: &mut RngSubstrate) -> String {
    (*rng.choose(&VOIVODESHIPS)).to_string()
}

pub fn random_first_name_male(rng: &mut RngSubstrate) -> String {
    (*rng.choose(&FIRST_NAMES_MALE)).to_string()
}

pub fn random_first_name_female(rng: &mut RngSubstrate) -> String {
    (*rng.choose(&FIRST_NAMES_FEMALE)).to_string()
}

pub fn random_last_name(rng: &mut RngSubstrate) -> String {
    (*rng.choose(&LAST_NAMES)).to_string()
}
